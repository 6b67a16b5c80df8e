//! Campaign catalog domain models.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tiers::TierAvailability;

/// Domain model for a crowdfunding campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub goal_amount: Decimal,
    pub current_amount: Decimal,
    pub is_active: bool,
    pub display_order: i32,
}

impl Campaign {
    /// Funding progress in whole percent; zero-goal campaigns report 0.
    pub fn percentage(&self) -> u32 {
        if self.goal_amount <= Decimal::ZERO {
            return 0;
        }
        let pct = (self.current_amount / self.goal_amount) * Decimal::from(100);
        pct.round().to_u32().unwrap_or(0)
    }
}

/// Campaign as listed publicly, with computed progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignWithProgress {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub percentage: u32,
}

impl From<Campaign> for CampaignWithProgress {
    fn from(campaign: Campaign) -> Self {
        let percentage = campaign.percentage();
        Self {
            campaign,
            percentage,
        }
    }
}

/// Single-campaign view with its open tiers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDetail {
    pub campaign: CampaignWithProgress,
    pub tiers: Vec<TierAvailability>,
}

/// Input model for seeding a campaign into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub goal_amount: Decimal,
    pub is_active: bool,
    pub display_order: i32,
}
