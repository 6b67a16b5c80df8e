//! Database models for contribution tiers.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use courtfund_core::tiers::{BenefitDescriptor, NewTier, Tier};

use crate::utils::parse_decimal;

/// Database model for contribution tiers.
///
/// The benefit descriptor list is stored as a JSON column; a row whose JSON
/// no longer parses yields an empty benefit list rather than failing the
/// read (and logs the defect).
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::contribution_tiers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TierDB {
    pub id: String,
    pub campaign_id: String,
    pub name: String,
    pub amount: String,
    pub max_backers: Option<i32>,
    pub current_backers: i32,
    pub benefits: String,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a tier
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contribution_tiers)]
#[serde(rename_all = "camelCase")]
pub struct NewTierDB {
    pub id: String,
    pub campaign_id: String,
    pub name: String,
    pub amount: String,
    pub max_backers: Option<i32>,
    pub current_backers: i32,
    pub benefits: String,
    pub is_active: bool,
    pub display_order: i32,
}

// Conversion to domain models
impl From<TierDB> for Tier {
    fn from(db: TierDB) -> Self {
        let benefits: Vec<BenefitDescriptor> =
            serde_json::from_str(&db.benefits).unwrap_or_else(|e| {
                log::error!("Unparseable benefits JSON on tier {}: {}", db.id, e);
                Vec::new()
            });
        Self {
            amount: parse_decimal(&db.amount, "contribution_tiers.amount"),
            benefits,
            id: db.id,
            campaign_id: db.campaign_id,
            name: db.name,
            max_backers: db.max_backers,
            current_backers: db.current_backers,
            is_active: db.is_active,
            display_order: db.display_order,
        }
    }
}

impl NewTierDB {
    pub fn from_domain(domain: NewTier, fallback_id: String) -> serde_json::Result<Self> {
        Ok(Self {
            id: domain.id.unwrap_or(fallback_id),
            campaign_id: domain.campaign_id,
            name: domain.name,
            amount: domain.amount.to_string(),
            max_backers: domain.max_backers,
            current_backers: 0,
            benefits: serde_json::to_string(&domain.benefits)?,
            is_active: domain.is_active,
            display_order: domain.display_order,
        })
    }
}
