//! Database models for the founders wall.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use courtfund_core::wall::{FoundersWallEntry, WallUpsert};

use crate::utils::parse_decimal;

/// Database model for founders wall entries
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::founders_wall)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FoundersWallEntryDB {
    pub id: String,
    pub backer_id: String,
    pub display_name: String,
    pub location: Option<String>,
    pub total_contributed: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert/update payload for the backer-keyed upsert
#[derive(Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::founders_wall)]
#[serde(rename_all = "camelCase")]
pub struct WallUpsertDB {
    pub id: String,
    pub backer_id: String,
    pub display_name: String,
    pub location: Option<String>,
    pub total_contributed: String,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<FoundersWallEntryDB> for FoundersWallEntry {
    fn from(db: FoundersWallEntryDB) -> Self {
        Self {
            total_contributed: parse_decimal(
                &db.total_contributed,
                "founders_wall.total_contributed",
            ),
            id: db.id,
            backer_id: db.backer_id,
            display_name: db.display_name,
            location: db.location,
            is_featured: db.is_featured,
            is_active: db.is_active,
            display_order: db.display_order,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl WallUpsertDB {
    pub fn from_domain(domain: WallUpsert, id: String, updated_at: NaiveDateTime) -> Self {
        Self {
            id,
            backer_id: domain.backer_id,
            display_name: domain.display_name,
            location: domain.location,
            total_contributed: domain.total_contributed.to_string(),
            is_active: domain.is_active,
            updated_at,
        }
    }
}
