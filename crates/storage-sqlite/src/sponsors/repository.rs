use courtfund_core::sponsors::{CourtSponsor, NewCourtSponsor, SponsorRepositoryTrait};
use courtfund_core::Result;

use super::model::{CourtSponsorDB, NewCourtSponsorDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::court_sponsors;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct SponsorRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SponsorRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SponsorRepository { pool, writer }
    }
}

#[async_trait]
impl SponsorRepositoryTrait for SponsorRepository {
    fn find_by_contribution(&self, contribution_id: &str) -> Result<Option<CourtSponsor>> {
        let mut conn = get_connection(&self.pool)?;
        let row = court_sponsors::table
            .filter(court_sponsors::contribution_id.eq(contribution_id))
            .first::<CourtSponsorDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(CourtSponsor::from))
    }

    fn list_active(&self) -> Result<Vec<CourtSponsor>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = court_sponsors::table
            .filter(court_sponsors::is_active.eq(true))
            .order(court_sponsors::sponsorship_start.asc())
            .load::<CourtSponsorDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(CourtSponsor::from).collect())
    }

    async fn insert(&self, new_sponsor: NewCourtSponsor) -> Result<CourtSponsor> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CourtSponsor> {
                let new_db =
                    NewCourtSponsorDB::from_domain(new_sponsor, Uuid::new_v4().to_string());
                let result_db = diesel::insert_into(court_sponsors::table)
                    .values(&new_db)
                    .returning(CourtSponsorDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(CourtSponsor::from(result_db))
            })
            .await
    }

    async fn deactivate_for_contribution(&self, contribution_id: &str) -> Result<usize> {
        let contribution_id = contribution_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::update(
                    court_sponsors::table
                        .filter(court_sponsors::contribution_id.eq(contribution_id))
                        .filter(court_sponsors::is_active.eq(true)),
                )
                .set(court_sponsors::is_active.eq(false))
                .execute(conn)
                .into_core()
            })
            .await
    }
}
