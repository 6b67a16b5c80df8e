//! Founders wall domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Public recognition row, one per backer.
///
/// Derived state: `total_contributed` is recomputed from the backer's
/// completed public contributions on every transition that touches them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoundersWallEntry {
    pub id: String,
    pub backer_id: String,
    pub display_name: String,
    pub location: Option<String>,
    pub total_contributed: Decimal,
    pub is_featured: bool,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Upsert payload, keyed by backer_id at the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallUpsert {
    pub backer_id: String,
    pub display_name: String,
    pub location: Option<String>,
    pub total_contributed: Decimal,
    pub is_active: bool,
}
