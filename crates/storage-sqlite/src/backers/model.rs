//! Database models for backers.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use courtfund_core::backers::{Backer, NewBacker};

/// Database model for backers
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::backers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct BackerDB {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_initial: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a backer
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::backers)]
#[serde(rename_all = "camelCase")]
pub struct NewBackerDB {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_initial: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

// Conversion to domain models
impl From<BackerDB> for Backer {
    fn from(db: BackerDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            first_name: db.first_name,
            last_initial: db.last_initial,
            phone: db.phone,
            city: db.city,
            state: db.state,
            created_at: db.created_at,
        }
    }
}

impl NewBackerDB {
    pub fn from_domain(domain: NewBacker, id: String) -> Self {
        Self {
            id,
            email: domain.email,
            first_name: domain.first_name,
            last_initial: domain.last_initial,
            phone: domain.phone,
            city: domain.city,
            state: domain.state,
        }
    }
}
