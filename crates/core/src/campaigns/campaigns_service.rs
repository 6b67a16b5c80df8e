use std::sync::Arc;

use super::campaigns_model::{CampaignDetail, CampaignWithProgress};
use super::campaigns_traits::{CampaignRepositoryTrait, CampaignServiceTrait};
use crate::tiers::{TierAvailability, TierRepositoryTrait};
use crate::Result;

/// Read-side service for the public campaign pages.
pub struct CampaignService {
    repository: Arc<dyn CampaignRepositoryTrait>,
    tier_repository: Arc<dyn TierRepositoryTrait>,
}

impl CampaignService {
    pub fn new(
        repository: Arc<dyn CampaignRepositoryTrait>,
        tier_repository: Arc<dyn TierRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            tier_repository,
        }
    }
}

#[async_trait::async_trait]
impl CampaignServiceTrait for CampaignService {
    fn list_active_with_progress(&self) -> Result<Vec<CampaignWithProgress>> {
        let campaigns = self.repository.list_active()?;
        Ok(campaigns.into_iter().map(CampaignWithProgress::from).collect())
    }

    fn get_campaign_detail(&self, campaign_id: &str) -> Result<CampaignDetail> {
        let campaign = self.repository.get_by_id(campaign_id)?;
        let tiers = self
            .tier_repository
            .list_open_for_campaign(&campaign.id)?
            .into_iter()
            .map(TierAvailability::from)
            .collect();
        Ok(CampaignDetail {
            campaign: campaign.into(),
            tiers,
        })
    }
}
