//! Database models for campaigns.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use courtfund_core::campaigns::{Campaign, NewCampaign};

use crate::utils::parse_decimal;

/// Database model for campaigns
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::campaigns)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CampaignDB {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub goal_amount: String,
    pub current_amount: String,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a campaign
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::campaigns)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaignDB {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub goal_amount: String,
    pub current_amount: String,
    pub is_active: bool,
    pub display_order: i32,
}

// Conversion to domain models
impl From<CampaignDB> for Campaign {
    fn from(db: CampaignDB) -> Self {
        Self {
            goal_amount: parse_decimal(&db.goal_amount, "campaigns.goal_amount"),
            current_amount: parse_decimal(&db.current_amount, "campaigns.current_amount"),
            id: db.id,
            name: db.name,
            slug: db.slug,
            description: db.description,
            is_active: db.is_active,
            display_order: db.display_order,
        }
    }
}

impl NewCampaignDB {
    pub fn from_domain(domain: NewCampaign, fallback_id: String) -> Self {
        Self {
            id: domain.id.unwrap_or(fallback_id),
            name: domain.name,
            slug: domain.slug,
            description: domain.description,
            goal_amount: domain.goal_amount.to_string(),
            current_amount: "0".to_string(),
            is_active: domain.is_active,
            display_order: domain.display_order,
        }
    }
}
