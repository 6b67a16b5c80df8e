use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;

use super::benefits_model::{BenefitAllocation, NewBenefitAllocation};
use super::benefits_traits::{BenefitRepositoryTrait, BenefitServiceTrait};
use crate::contributions::Contribution;
use crate::tiers::TierRepositoryTrait;
use crate::Result;

/// The benefit allocator.
///
/// Reads the tier's descriptor list at the moment of completion and inserts
/// one allocation per descriptor. The webhook may be redelivered, so the
/// allocator checks for existing rows first and additionally treats a
/// unique-constraint violation from a concurrent delivery as a benign no-op.
pub struct BenefitService {
    repository: Arc<dyn BenefitRepositoryTrait>,
    tier_repository: Arc<dyn TierRepositoryTrait>,
}

impl BenefitService {
    pub fn new(
        repository: Arc<dyn BenefitRepositoryTrait>,
        tier_repository: Arc<dyn TierRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            tier_repository,
        }
    }
}

#[async_trait::async_trait]
impl BenefitServiceTrait for BenefitService {
    async fn allocate_for_contribution(
        &self,
        contribution: &Contribution,
    ) -> Result<Vec<BenefitAllocation>> {
        let Some(tier_id) = contribution.tier_id.as_deref() else {
            debug!(
                "Contribution {} has no tier, nothing to allocate",
                contribution.id
            );
            return Ok(Vec::new());
        };

        let tier = self.tier_repository.get_by_id(tier_id)?;
        let existing: HashSet<String> = self
            .repository
            .list_for_contribution(&contribution.id)?
            .into_iter()
            .map(|a| a.benefit_type)
            .collect();

        let mut created = Vec::new();
        for descriptor in &tier.benefits {
            if existing.contains(&descriptor.benefit_type) {
                debug!(
                    "Benefit '{}' already allocated for contribution {}",
                    descriptor.benefit_type, contribution.id
                );
                continue;
            }
            let allocation = NewBenefitAllocation::from_descriptor(contribution, descriptor);
            match self.repository.insert(allocation).await {
                Ok(row) => created.push(row),
                Err(err) if err.is_unique_violation() => {
                    // A concurrent delivery won the insert race.
                    debug!(
                        "Duplicate allocation of '{}' for contribution {} skipped",
                        descriptor.benefit_type, contribution.id
                    );
                }
                Err(err) => {
                    warn!(
                        "Failed to allocate benefit '{}' for contribution {}: {}",
                        descriptor.benefit_type, contribution.id, err
                    );
                    return Err(err);
                }
            }
        }
        Ok(created)
    }

    async fn deactivate_for_contribution(&self, contribution_id: &str) -> Result<usize> {
        self.repository
            .deactivate_for_contribution(contribution_id)
            .await
    }

    fn get_active_for_backer(&self, backer_id: &str) -> Result<Vec<BenefitAllocation>> {
        self.repository.list_active_for_backer(backer_id)
    }
}
