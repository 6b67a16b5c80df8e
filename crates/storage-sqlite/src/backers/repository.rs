use courtfund_core::backers::{Backer, BackerRepositoryTrait, NewBacker};
use courtfund_core::Result;

use super::model::{BackerDB, NewBackerDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::backers;
use crate::schema::backers::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct BackerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BackerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BackerRepository { pool, writer }
    }
}

#[async_trait]
impl BackerRepositoryTrait for BackerRepository {
    fn get_by_id(&self, backer_id: &str) -> Result<Backer> {
        let mut conn = get_connection(&self.pool)?;
        let backer_db = backers
            .find(backer_id)
            .first::<BackerDB>(&mut conn)
            .into_core()?;
        Ok(Backer::from(backer_db))
    }

    fn find_by_email(&self, backer_email: &str) -> Result<Option<Backer>> {
        let mut conn = get_connection(&self.pool)?;
        let backer_db = backers
            .filter(email.eq(backer_email))
            .first::<BackerDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(backer_db.map(Backer::from))
    }

    async fn insert(&self, new_backer: NewBacker) -> Result<Backer> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Backer> {
                let new_backer_db =
                    NewBackerDB::from_domain(new_backer, Uuid::new_v4().to_string());
                let result_db = diesel::insert_into(backers::table)
                    .values(&new_backer_db)
                    .returning(BackerDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Backer::from(result_db))
            })
            .await
    }
}
