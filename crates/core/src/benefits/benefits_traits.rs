use super::benefits_model::{BenefitAllocation, NewBenefitAllocation};
use crate::contributions::Contribution;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for BenefitAllocation repository operations.
#[async_trait]
pub trait BenefitRepositoryTrait: Send + Sync {
    fn list_for_contribution(&self, contribution_id: &str) -> Result<Vec<BenefitAllocation>>;
    /// Active, unexpired allocations for a backer.
    fn list_active_for_backer(&self, backer_id: &str) -> Result<Vec<BenefitAllocation>>;
    /// Insert one allocation. The store enforces uniqueness on
    /// (contribution_id, benefit_type); violations surface as
    /// `DatabaseError::UniqueViolation`.
    async fn insert(&self, new_allocation: NewBenefitAllocation) -> Result<BenefitAllocation>;
    /// Flips is_active off for every allocation of the contribution.
    /// Returns the number of rows touched.
    async fn deactivate_for_contribution(&self, contribution_id: &str) -> Result<usize>;
}

/// Trait defining the contract for the benefit allocator.
#[async_trait]
pub trait BenefitServiceTrait: Send + Sync {
    /// Grants the contribution's tier benefits, exactly once per
    /// (contribution, benefit type) no matter how often it is called.
    /// Returns the allocations created by this call.
    async fn allocate_for_contribution(
        &self,
        contribution: &Contribution,
    ) -> Result<Vec<BenefitAllocation>>;
    async fn deactivate_for_contribution(&self, contribution_id: &str) -> Result<usize>;
    fn get_active_for_backer(&self, backer_id: &str) -> Result<Vec<BenefitAllocation>>;
}
