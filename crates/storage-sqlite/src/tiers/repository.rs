use courtfund_core::tiers::{NewTier, Tier, TierRepositoryTrait};
use courtfund_core::Result;

use super::model::{NewTierDB, TierDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::contribution_tiers;
use crate::schema::contribution_tiers::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct TierRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TierRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TierRepository { pool, writer }
    }
}

#[async_trait]
impl TierRepositoryTrait for TierRepository {
    fn get_by_id(&self, tier_id: &str) -> Result<Tier> {
        let mut conn = get_connection(&self.pool)?;
        let tier_db = contribution_tiers
            .find(tier_id)
            .first::<TierDB>(&mut conn)
            .into_core()?;
        Ok(Tier::from(tier_db))
    }

    fn list_open_for_campaign(&self, for_campaign_id: &str) -> Result<Vec<Tier>> {
        let mut conn = get_connection(&self.pool)?;
        let tiers_db = contribution_tiers
            .filter(campaign_id.eq(for_campaign_id))
            .filter(is_active.eq(true))
            .filter(
                max_backers
                    .is_null()
                    .or(current_backers.nullable().lt(max_backers)),
            )
            .order(display_order.asc())
            .load::<TierDB>(&mut conn)
            .into_core()?;
        Ok(tiers_db.into_iter().map(Tier::from).collect())
    }

    async fn insert(&self, new_tier: NewTier) -> Result<Tier> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Tier> {
                let new_tier_db = NewTierDB::from_domain(new_tier, Uuid::new_v4().to_string())?;
                let result_db = diesel::insert_into(contribution_tiers::table)
                    .values(&new_tier_db)
                    .returning(TierDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Tier::from(result_db))
            })
            .await
    }
}
