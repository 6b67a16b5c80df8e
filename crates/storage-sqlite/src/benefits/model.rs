//! Database models for backer benefits.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use courtfund_core::benefits::{BenefitAllocation, NewBenefitAllocation};

/// Database model for benefit allocations
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::backer_benefits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct BenefitAllocationDB {
    pub id: String,
    pub backer_id: String,
    pub contribution_id: String,
    pub benefit_type: String,
    pub benefit_details: String,
    pub expires_at: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a benefit allocation
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::backer_benefits)]
#[serde(rename_all = "camelCase")]
pub struct NewBenefitAllocationDB {
    pub id: String,
    pub backer_id: String,
    pub contribution_id: String,
    pub benefit_type: String,
    pub benefit_details: String,
    pub expires_at: Option<NaiveDate>,
}

// Conversion to domain models
impl From<BenefitAllocationDB> for BenefitAllocation {
    fn from(db: BenefitAllocationDB) -> Self {
        let benefit_details = serde_json::from_str(&db.benefit_details).unwrap_or_else(|e| {
            log::error!(
                "Unparseable benefit details on allocation {}: {}",
                db.id,
                e
            );
            serde_json::Value::Object(Default::default())
        });
        Self {
            benefit_details,
            id: db.id,
            backer_id: db.backer_id,
            contribution_id: db.contribution_id,
            benefit_type: db.benefit_type,
            expires_at: db.expires_at,
            is_active: db.is_active,
            created_at: db.created_at,
        }
    }
}

impl NewBenefitAllocationDB {
    pub fn from_domain(domain: NewBenefitAllocation, id: String) -> serde_json::Result<Self> {
        Ok(Self {
            id,
            backer_id: domain.backer_id,
            contribution_id: domain.contribution_id,
            benefit_type: domain.benefit_type,
            benefit_details: serde_json::to_string(&domain.benefit_details)?,
            expires_at: domain.expires_at,
        })
    }
}
