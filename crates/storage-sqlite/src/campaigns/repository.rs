use courtfund_core::campaigns::{Campaign, CampaignRepositoryTrait, NewCampaign};
use courtfund_core::Result;

use super::model::{CampaignDB, NewCampaignDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::campaigns;
use crate::schema::campaigns::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct CampaignRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CampaignRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CampaignRepository { pool, writer }
    }
}

#[async_trait]
impl CampaignRepositoryTrait for CampaignRepository {
    fn get_by_id(&self, campaign_id: &str) -> Result<Campaign> {
        let mut conn = get_connection(&self.pool)?;
        let campaign_db = campaigns
            .find(campaign_id)
            .first::<CampaignDB>(&mut conn)
            .into_core()?;
        Ok(Campaign::from(campaign_db))
    }

    fn list_active(&self) -> Result<Vec<Campaign>> {
        let mut conn = get_connection(&self.pool)?;
        let campaigns_db = campaigns
            .filter(is_active.eq(true))
            .order(display_order.asc())
            .load::<CampaignDB>(&mut conn)
            .into_core()?;
        Ok(campaigns_db.into_iter().map(Campaign::from).collect())
    }

    async fn insert(&self, new_campaign: NewCampaign) -> Result<Campaign> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let new_campaign_db =
                    NewCampaignDB::from_domain(new_campaign, Uuid::new_v4().to_string());
                let result_db = diesel::insert_into(campaigns::table)
                    .values(&new_campaign_db)
                    .returning(CampaignDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Campaign::from(result_db))
            })
            .await
    }
}
