//! Benefit allocation domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contributions::Contribution;
use crate::tiers::BenefitDescriptor;

/// One benefit granted to a backer for a specific completed contribution.
///
/// The details are copied from the tier descriptor at allocation time and
/// never re-derived, so later catalog edits don't change what was granted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BenefitAllocation {
    pub id: String,
    pub backer_id: String,
    pub contribution_id: String,
    pub benefit_type: String,
    pub benefit_details: Value,
    pub expires_at: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Input model for inserting an allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBenefitAllocation {
    pub backer_id: String,
    pub contribution_id: String,
    pub benefit_type: String,
    pub benefit_details: Value,
    pub expires_at: Option<NaiveDate>,
}

impl NewBenefitAllocation {
    /// Builds the allocation a descriptor grants for a contribution.
    ///
    /// Lifetime benefits never expire; otherwise the descriptor's absolute
    /// expiry date is copied verbatim.
    pub fn from_descriptor(contribution: &Contribution, descriptor: &BenefitDescriptor) -> Self {
        Self {
            backer_id: contribution.backer_id.clone(),
            contribution_id: contribution.id.clone(),
            benefit_type: descriptor.benefit_type.clone(),
            benefit_details: descriptor
                .details
                .clone()
                .unwrap_or_else(|| Value::Object(Default::default())),
            expires_at: if descriptor.lifetime {
                None
            } else {
                descriptor.expires_at
            },
        }
    }
}
