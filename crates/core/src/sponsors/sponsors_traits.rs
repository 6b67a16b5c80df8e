use super::sponsors_model::{CourtSponsor, NewCourtSponsor};
use crate::contributions::Contribution;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for CourtSponsor repository operations.
#[async_trait]
pub trait SponsorRepositoryTrait: Send + Sync {
    fn find_by_contribution(&self, contribution_id: &str) -> Result<Option<CourtSponsor>>;
    fn list_active(&self) -> Result<Vec<CourtSponsor>>;
    /// The store enforces uniqueness on contribution_id.
    async fn insert(&self, new_sponsor: NewCourtSponsor) -> Result<CourtSponsor>;
    async fn deactivate_for_contribution(&self, contribution_id: &str) -> Result<usize>;
}

/// Trait defining the contract for the sponsor/recognition engine.
#[async_trait]
pub trait SponsorServiceTrait: Send + Sync {
    /// Creates the sponsor row for a qualifying completed contribution.
    ///
    /// Returns the sponsor now on record: `None` when the amount is below
    /// the threshold, the existing row when one was already created by an
    /// earlier delivery.
    async fn grant_for_contribution(
        &self,
        contribution: &Contribution,
    ) -> Result<Option<CourtSponsor>>;
    async fn revoke_for_contribution(&self, contribution_id: &str) -> Result<usize>;
    fn list_active(&self) -> Result<Vec<CourtSponsor>>;
}
