//! Database models for court sponsors.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use courtfund_core::sponsors::{CourtSponsor, NewCourtSponsor};

/// Database model for court sponsors
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::court_sponsors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CourtSponsorDB {
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

/// Database model for creating a court sponsor
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::court_sponsors)]
#[serde(rename_all = "camelCase")]
pub struct NewCourtSponsorDB {
    pub id: String,
    pub backer_id: String,
    pub contribution_id: String,
    pub sponsor_name: String,
    pub sponsor_type: String,
    pub sponsorship_start: NaiveDate,
}

// Conversion to domain models
impl From<CourtSponsorDB> for CourtSponsor {
    fn from(db: CourtSponsorDB) -> Self {
        Self {
            id: db.id,
            backer_id: db.backer_id,
            contribution_id: db.contribution_id,
            sponsor_name: db.sponsor_name,
            sponsor_type: db.sponsor_type,
            court_number: db.court_number,
            logo_url: db.logo_url,
            sponsorship_start: db.sponsorship_start,
            sponsorship_end: db.sponsorship_end,
            is_active: db.is_active,
            created_at: db.created_at,
        }
    }
}

impl NewCourtSponsorDB {
    pub fn from_domain(domain: NewCourtSponsor, id: String) -> Self {
        Self {
            id,
            backer_id: domain.backer_id,
            contribution_id: domain.contribution_id,
            sponsor_name: domain.sponsor_name,
            sponsor_type: domain.sponsor_type,
            sponsorship_start: domain.sponsorship_start,
        }
    }
}
