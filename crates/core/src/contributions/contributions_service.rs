use log::{debug, warn};
use std::sync::Arc;

use super::contributions_model::{
    CompletionUpdate, Contribution, ContributionStatus, NewContribution,
};
use super::contributions_traits::{ContributionRepositoryTrait, ContributionServiceTrait};
use crate::Result;

/// Service applying webhook-driven status transitions to contributions.
///
/// All transitions are idempotent: re-applying an already-applied event
/// returns the current row without another write, and events arriving after
/// the row reached a terminal state are ignored.
pub struct ContributionService {
    repository: Arc<dyn ContributionRepositoryTrait>,
}

impl ContributionService {
    pub fn new(repository: Arc<dyn ContributionRepositoryTrait>) -> Self {
        Self { repository }
    }

    async fn complete(
        &self,
        contribution: Contribution,
        update: CompletionUpdate,
    ) -> Result<Contribution> {
        match contribution.status {
            ContributionStatus::Completed => {
                // Redelivered success event. The only thing worth doing is
                // backfilling a charge id the first delivery didn't carry.
                if contribution.stripe_charge_id.is_none() {
                    if let Some(charge_id) = update.charge_id {
                        debug!(
                            "Backfilling charge {} on completed contribution {}",
                            charge_id, contribution.id
                        );
                        return self.repository.record_charge(contribution.id, charge_id).await;
                    }
                }
                Ok(contribution)
            }
            ContributionStatus::Refunded => {
                warn!(
                    "Ignoring success event for refunded contribution {}",
                    contribution.id
                );
                Ok(contribution)
            }
            ContributionStatus::Pending | ContributionStatus::Failed => {
                self.repository.mark_completed(contribution.id, update).await
            }
        }
    }
}

#[async_trait::async_trait]
impl ContributionServiceTrait for ContributionService {
    async fn create_pending(&self, new_contribution: NewContribution) -> Result<Contribution> {
        new_contribution.validate()?;
        self.repository.insert(new_contribution).await
    }

    fn get_by_checkout_session(&self, session_id: &str) -> Result<Option<Contribution>> {
        self.repository.find_by_checkout_session(session_id)
    }

    fn list_public_completed(&self, campaign_id: Option<&str>) -> Result<Vec<Contribution>> {
        self.repository.list_public_completed(campaign_id)
    }

    async fn complete_by_checkout_session(
        &self,
        session_id: &str,
        update: CompletionUpdate,
    ) -> Result<Option<Contribution>> {
        let Some(contribution) = self.repository.find_by_checkout_session(session_id)? else {
            debug!("No contribution for checkout session {}", session_id);
            return Ok(None);
        };
        self.complete(contribution, update).await.map(Some)
    }

    async fn complete_by_id(
        &self,
        contribution_id: &str,
        update: CompletionUpdate,
    ) -> Result<Option<Contribution>> {
        let contribution = match self.repository.get_by_id(contribution_id) {
            Ok(c) => c,
            Err(err) if err.is_not_found() => {
                debug!("No contribution with id {}", contribution_id);
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        self.complete(contribution, update).await.map(Some)
    }

    async fn complete_by_payment_intent(
        &self,
        payment_intent_id: &str,
        charge_id: Option<String>,
    ) -> Result<Option<Contribution>> {
        let Some(contribution) = self.repository.find_by_payment_intent(payment_intent_id)? else {
            debug!("No contribution for payment intent {}", payment_intent_id);
            return Ok(None);
        };
        let update = CompletionUpdate {
            payment_intent_id: Some(payment_intent_id.to_string()),
            charge_id,
            payment_method: None,
        };
        self.complete(contribution, update).await.map(Some)
    }

    async fn fail_by_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<Contribution>> {
        let Some(contribution) = self.repository.find_by_payment_intent(payment_intent_id)? else {
            debug!("No contribution for payment intent {}", payment_intent_id);
            return Ok(None);
        };
        match contribution.status {
            ContributionStatus::Pending => {
                self.repository.mark_failed(contribution.id).await.map(Some)
            }
            // A failure event racing behind a success (or refund) must not
            // regress the row.
            other => {
                debug!(
                    "Ignoring payment failure for contribution {} in state {}",
                    contribution.id, other
                );
                Ok(Some(contribution))
            }
        }
    }

    async fn refund_by_charge(
        &self,
        charge_id: &str,
        payment_intent_id: Option<&str>,
    ) -> Result<Option<Contribution>> {
        let mut found = self.repository.find_by_charge(charge_id)?;
        if found.is_none() {
            if let Some(payment_intent_id) = payment_intent_id {
                found = self.repository.find_by_payment_intent(payment_intent_id)?;
            }
        }
        let Some(contribution) = found else {
            debug!("No contribution for charge {}", charge_id);
            return Ok(None);
        };
        match contribution.status {
            ContributionStatus::Completed => self
                .repository
                .mark_refunded(contribution.id)
                .await
                .map(Some),
            ContributionStatus::Refunded => Ok(Some(contribution)),
            other => {
                warn!(
                    "Ignoring refund for contribution {} in state {}",
                    contribution.id, other
                );
                Ok(Some(contribution))
            }
        }
    }
}
