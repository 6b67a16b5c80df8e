//! Court sponsor domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Recognition record for a large completed contribution.
///
/// At most one sponsor row exists per contribution. Refunds deactivate the
/// row; history is preserved, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourtSponsor {
    pub id: String,
    pub backer_id: String,
    pub contribution_id: String,
    pub sponsor_name: String,
    pub sponsor_type: String,
    pub court_number: Option<i32>,
    pub logo_url: Option<String>,
    pub sponsorship_start: NaiveDate,
    pub sponsorship_end: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a sponsor row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourtSponsor {
    pub backer_id: String,
    pub contribution_id: String,
    pub sponsor_name: String,
    pub sponsor_type: String,
    pub sponsorship_start: NaiveDate,
}
