use courtfund_core::benefits::{
    BenefitAllocation, BenefitRepositoryTrait, NewBenefitAllocation,
};
use courtfund_core::Result;

use super::model::{BenefitAllocationDB, NewBenefitAllocationDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::backer_benefits;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct BenefitRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BenefitRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BenefitRepository { pool, writer }
    }
}

#[async_trait]
impl BenefitRepositoryTrait for BenefitRepository {
    fn list_for_contribution(&self, contribution_id: &str) -> Result<Vec<BenefitAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = backer_benefits::table
            .filter(backer_benefits::contribution_id.eq(contribution_id))
            .load::<BenefitAllocationDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(BenefitAllocation::from).collect())
    }

    fn list_active_for_backer(&self, backer_id: &str) -> Result<Vec<BenefitAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        let today = Utc::now().date_naive();
        let rows = backer_benefits::table
            .filter(backer_benefits::backer_id.eq(backer_id))
            .filter(backer_benefits::is_active.eq(true))
            .filter(
                backer_benefits::expires_at
                    .is_null()
                    .or(backer_benefits::expires_at.ge(today)),
            )
            .order(backer_benefits::created_at.asc())
            .load::<BenefitAllocationDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(BenefitAllocation::from).collect())
    }

    async fn insert(&self, new_allocation: NewBenefitAllocation) -> Result<BenefitAllocation> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<BenefitAllocation> {
                    let new_db = NewBenefitAllocationDB::from_domain(
                        new_allocation,
                        Uuid::new_v4().to_string(),
                    )?;
                    let result_db = diesel::insert_into(backer_benefits::table)
                        .values(&new_db)
                        .returning(BenefitAllocationDB::as_returning())
                        .get_result(conn)
                        .into_core()?;
                    Ok(BenefitAllocation::from(result_db))
                },
            )
            .await
    }

    async fn deactivate_for_contribution(&self, contribution_id: &str) -> Result<usize> {
        let contribution_id = contribution_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::update(
                    backer_benefits::table
                        .filter(backer_benefits::contribution_id.eq(contribution_id))
                        .filter(backer_benefits::is_active.eq(true)),
                )
                .set(backer_benefits::is_active.eq(false))
                .execute(conn)
                .into_core()
            })
            .await
    }
}
