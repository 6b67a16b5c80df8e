use courtfund_core::wall::{FoundersWallEntry, WallRepositoryTrait, WallUpsert};
use courtfund_core::Result;

use super::model::{FoundersWallEntryDB, WallUpsertDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::founders_wall;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct WallRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WallRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        WallRepository { pool, writer }
    }
}

#[async_trait]
impl WallRepositoryTrait for WallRepository {
    fn find_by_backer(&self, backer_id: &str) -> Result<Option<FoundersWallEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let row = founders_wall::table
            .filter(founders_wall::backer_id.eq(backer_id))
            .first::<FoundersWallEntryDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(FoundersWallEntry::from))
    }

    fn list_active(&self) -> Result<Vec<FoundersWallEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = founders_wall::table
            .filter(founders_wall::is_active.eq(true))
            .load::<FoundersWallEntryDB>(&mut conn)
            .into_core()?;
        let mut entries: Vec<FoundersWallEntry> =
            rows.into_iter().map(FoundersWallEntry::from).collect();
        // Amounts live as TEXT; the ordering contract needs numeric order,
        // so sort after conversion.
        entries.sort_by(|a, b| {
            b.total_contributed
                .cmp(&a.total_contributed)
                .then(a.display_order.cmp(&b.display_order))
        });
        Ok(entries)
    }

    async fn upsert(&self, upsert: WallUpsert) -> Result<FoundersWallEntry> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<FoundersWallEntry> {
                    let now = Utc::now().naive_utc();
                    let row =
                        WallUpsertDB::from_domain(upsert, Uuid::new_v4().to_string(), now);

                    diesel::insert_into(founders_wall::table)
                        .values(&row)
                        .on_conflict(founders_wall::backer_id)
                        .do_update()
                        .set((
                            founders_wall::display_name.eq(row.display_name.clone()),
                            founders_wall::location.eq(row.location.clone()),
                            founders_wall::total_contributed
                                .eq(row.total_contributed.clone()),
                            founders_wall::is_active.eq(row.is_active),
                            founders_wall::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .into_core()?;

                    let result_db = founders_wall::table
                        .filter(founders_wall::backer_id.eq(&row.backer_id))
                        .first::<FoundersWallEntryDB>(conn)
                        .into_core()?;
                    Ok(FoundersWallEntry::from(result_db))
                },
            )
            .await
    }
}
