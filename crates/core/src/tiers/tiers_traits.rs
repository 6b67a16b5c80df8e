use super::tiers_model::{NewTier, Tier};
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for tier catalog repository operations.
#[async_trait]
pub trait TierRepositoryTrait: Send + Sync {
    fn get_by_id(&self, tier_id: &str) -> Result<Tier>;
    /// Active tiers of a campaign that still have capacity, in display order.
    fn list_open_for_campaign(&self, campaign_id: &str) -> Result<Vec<Tier>>;
    /// Catalog seeding; not used by the webhook flow.
    async fn insert(&self, new_tier: NewTier) -> Result<Tier>;
}
