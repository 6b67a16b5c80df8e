use super::campaigns_model::{Campaign, CampaignDetail, CampaignWithProgress, NewCampaign};
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for campaign catalog repository operations.
#[async_trait]
pub trait CampaignRepositoryTrait: Send + Sync {
    fn get_by_id(&self, campaign_id: &str) -> Result<Campaign>;
    fn list_active(&self) -> Result<Vec<Campaign>>;
    /// Catalog seeding; not used by the webhook flow.
    async fn insert(&self, new_campaign: NewCampaign) -> Result<Campaign>;
}

/// Trait defining the contract for campaign read operations.
#[async_trait]
pub trait CampaignServiceTrait: Send + Sync {
    fn list_active_with_progress(&self) -> Result<Vec<CampaignWithProgress>>;
    fn get_campaign_detail(&self, campaign_id: &str) -> Result<CampaignDetail>;
}
