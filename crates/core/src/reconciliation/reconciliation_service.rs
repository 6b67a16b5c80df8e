use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

use crate::benefits::BenefitServiceTrait;
use crate::contributions::{ContributionRepositoryTrait, ContributionStatus};
use crate::sponsors::SponsorServiceTrait;
use crate::wall::WallServiceTrait;
use crate::Result;

/// Counters reported by one sweep run.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationSummary {
    pub completed_examined: usize,
    pub refunded_examined: usize,
    pub allocations_created: usize,
    pub sponsors_ensured: usize,
    pub deactivations_applied: usize,
    pub failures: usize,
}

/// Trait defining the contract for the reconciliation sweep.
#[async_trait::async_trait]
pub trait ReconciliationServiceTrait: Send + Sync {
    async fn run_sweep(&self) -> Result<ReconciliationSummary>;
}

/// Repairs the gap the best-effort webhook fan-out can leave behind.
///
/// A completed contribution may transiently lack its benefits, sponsor row,
/// or wall entry when a sibling step failed after the status write. The
/// sweep re-derives all of them from contribution state; every step it
/// calls is idempotent, so running it repeatedly (or concurrently with live
/// webhook traffic) is safe. Per-contribution failures are counted and
/// logged, never fatal to the sweep.
pub struct ReconciliationService {
    contribution_repository: Arc<dyn ContributionRepositoryTrait>,
    benefit_service: Arc<dyn BenefitServiceTrait>,
    sponsor_service: Arc<dyn SponsorServiceTrait>,
    wall_service: Arc<dyn WallServiceTrait>,
}

impl ReconciliationService {
    pub fn new(
        contribution_repository: Arc<dyn ContributionRepositoryTrait>,
        benefit_service: Arc<dyn BenefitServiceTrait>,
        sponsor_service: Arc<dyn SponsorServiceTrait>,
        wall_service: Arc<dyn WallServiceTrait>,
    ) -> Self {
        Self {
            contribution_repository,
            benefit_service,
            sponsor_service,
            wall_service,
        }
    }
}

#[async_trait::async_trait]
impl ReconciliationServiceTrait for ReconciliationService {
    async fn run_sweep(&self) -> Result<ReconciliationSummary> {
        let mut summary = ReconciliationSummary::default();

        for contribution in self
            .contribution_repository
            .list_by_status(ContributionStatus::Completed)?
        {
            summary.completed_examined += 1;

            match self
                .benefit_service
                .allocate_for_contribution(&contribution)
                .await
            {
                Ok(created) => summary.allocations_created += created.len(),
                Err(e) => {
                    warn!(
                        "Sweep: allocation repair failed for contribution {}: {}",
                        contribution.id, e
                    );
                    summary.failures += 1;
                }
            }

            match self
                .sponsor_service
                .grant_for_contribution(&contribution)
                .await
            {
                Ok(Some(_)) => summary.sponsors_ensured += 1,
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        "Sweep: sponsor repair failed for contribution {}: {}",
                        contribution.id, e
                    );
                    summary.failures += 1;
                }
            }

            if contribution.is_public {
                if let Err(e) = self
                    .wall_service
                    .refresh_for_backer(&contribution.backer_id)
                    .await
                {
                    warn!(
                        "Sweep: wall repair failed for backer {}: {}",
                        contribution.backer_id, e
                    );
                    summary.failures += 1;
                }
            }
        }

        for contribution in self
            .contribution_repository
            .list_by_status(ContributionStatus::Refunded)?
        {
            summary.refunded_examined += 1;

            match self
                .benefit_service
                .deactivate_for_contribution(&contribution.id)
                .await
            {
                Ok(count) => summary.deactivations_applied += count,
                Err(e) => {
                    warn!(
                        "Sweep: benefit deactivation failed for contribution {}: {}",
                        contribution.id, e
                    );
                    summary.failures += 1;
                }
            }

            match self
                .sponsor_service
                .revoke_for_contribution(&contribution.id)
                .await
            {
                Ok(count) => summary.deactivations_applied += count,
                Err(e) => {
                    warn!(
                        "Sweep: sponsor deactivation failed for contribution {}: {}",
                        contribution.id, e
                    );
                    summary.failures += 1;
                }
            }

            if let Err(e) = self
                .wall_service
                .refresh_for_backer(&contribution.backer_id)
                .await
            {
                warn!(
                    "Sweep: wall refresh failed for backer {}: {}",
                    contribution.backer_id, e
                );
                summary.failures += 1;
            }
        }

        info!(
            "Reconciliation sweep done: {} completed, {} refunded examined, {} allocations created, {} deactivations, {} failures",
            summary.completed_examined,
            summary.refunded_examined,
            summary.allocations_created,
            summary.deactivations_applied,
            summary.failures
        );
        Ok(summary)
    }
}
