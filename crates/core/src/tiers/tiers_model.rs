//! Tier catalog domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One benefit granted by a tier.
///
/// This shape is an external contract shared with the catalog authoring
/// side: `details` is opaque structured data copied verbatim into
/// allocations, and `expiresAt` is an absolute date owned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BenefitDescriptor {
    #[serde(rename = "type")]
    pub benefit_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default)]
    pub lifetime: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
}

/// Domain model for a contribution tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub id: String,
    pub campaign_id: String,
    pub name: String,
    pub amount: Decimal,
    pub max_backers: Option<i32>,
    pub current_backers: i32,
    pub benefits: Vec<BenefitDescriptor>,
    pub is_active: bool,
    pub display_order: i32,
}

impl Tier {
    /// Remaining capacity; None for uncapped tiers.
    pub fn spots_remaining(&self) -> Option<i32> {
        self.max_backers
            .map(|max| (max - self.current_backers).max(0))
    }

    pub fn is_full(&self) -> bool {
        matches!(self.spots_remaining(), Some(0))
    }
}

/// Tier as presented on the public campaign page, with remaining capacity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAvailability {
    #[serde(flatten)]
    pub tier: Tier,
    pub spots_remaining: Option<i32>,
}

impl From<Tier> for TierAvailability {
    fn from(tier: Tier) -> Self {
        let spots_remaining = tier.spots_remaining();
        Self {
            tier,
            spots_remaining,
        }
    }
}

/// Input model for seeding a tier into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub campaign_id: String,
    pub name: String,
    pub amount: Decimal,
    pub max_backers: Option<i32>,
    pub benefits: Vec<BenefitDescriptor>,
    pub is_active: bool,
    pub display_order: i32,
}
