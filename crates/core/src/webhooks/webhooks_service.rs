use log::{debug, error, info, warn};
use std::sync::Arc;

use super::webhooks_model::{ChargePayload, CheckoutSessionPayload, PaymentIntentPayload, StripeEvent};
use crate::benefits::BenefitServiceTrait;
use crate::contributions::{
    CompletionUpdate, Contribution, ContributionServiceTrait, ContributionStatus,
};
use crate::sponsors::SponsorServiceTrait;
use crate::wall::WallServiceTrait;
use crate::Result;

/// What handling a verified event amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A transition (and its side effects) was applied.
    Processed,
    /// Nothing to do: unrecognized type, or the row was already in a state
    /// the event cannot move.
    Ignored,
    /// The transition key resolved to no contribution yet; acknowledged,
    /// the provider's redelivery will retry.
    NotFound,
}

/// Trait defining the contract for webhook event handling.
#[async_trait::async_trait]
pub trait WebhookServiceTrait: Send + Sync {
    async fn handle_event(&self, event: StripeEvent) -> Result<WebhookOutcome>;
}

/// Dispatches verified provider events into the contribution flow.
///
/// Completion and refund both fan out across independent writes (benefits,
/// sponsor, wall). There is no cross-step transaction: each step is
/// attempted even when a sibling fails, failures are logged individually,
/// and the first one is surfaced so the delivery returns 500 and the
/// provider redelivers. Every step is idempotent, which makes that retry
/// safe.
pub struct WebhookService {
    contribution_service: Arc<dyn ContributionServiceTrait>,
    benefit_service: Arc<dyn BenefitServiceTrait>,
    sponsor_service: Arc<dyn SponsorServiceTrait>,
    wall_service: Arc<dyn WallServiceTrait>,
}

impl WebhookService {
    pub fn new(
        contribution_service: Arc<dyn ContributionServiceTrait>,
        benefit_service: Arc<dyn BenefitServiceTrait>,
        sponsor_service: Arc<dyn SponsorServiceTrait>,
        wall_service: Arc<dyn WallServiceTrait>,
    ) -> Self {
        Self {
            contribution_service,
            benefit_service,
            sponsor_service,
            wall_service,
        }
    }

    async fn handle_checkout_completed(
        &self,
        session: CheckoutSessionPayload,
    ) -> Result<WebhookOutcome> {
        let update = CompletionUpdate {
            payment_intent_id: session.payment_intent.clone(),
            charge_id: None,
            payment_method: session.payment_method().map(String::from),
        };

        let mut contribution = self
            .contribution_service
            .complete_by_checkout_session(&session.id, update.clone())
            .await?;

        // The session id is the primary key into our rows, but sessions
        // created before the id was recorded are still reachable through
        // the metadata the checkout flow attached.
        if contribution.is_none() {
            if let Some(contribution_id) = session.metadata.contribution_id.as_deref() {
                contribution = self
                    .contribution_service
                    .complete_by_id(contribution_id, update)
                    .await?;
            }
        }

        let Some(contribution) = contribution else {
            warn!(
                "checkout.session.completed: no contribution for session {}",
                session.id
            );
            return Ok(WebhookOutcome::NotFound);
        };

        if contribution.status != ContributionStatus::Completed {
            return Ok(WebhookOutcome::Ignored);
        }

        info!(
            "Contribution {} completed via checkout session {}",
            contribution.id, session.id
        );
        self.apply_completion_side_effects(&contribution).await?;
        Ok(WebhookOutcome::Processed)
    }

    async fn handle_payment_succeeded(
        &self,
        payment_intent: PaymentIntentPayload,
    ) -> Result<WebhookOutcome> {
        let contribution = self
            .contribution_service
            .complete_by_payment_intent(&payment_intent.id, payment_intent.latest_charge.clone())
            .await?;

        let Some(contribution) = contribution else {
            debug!(
                "payment_intent.succeeded: no contribution for {}",
                payment_intent.id
            );
            return Ok(WebhookOutcome::NotFound);
        };

        if contribution.status != ContributionStatus::Completed {
            return Ok(WebhookOutcome::Ignored);
        }

        self.apply_completion_side_effects(&contribution).await?;
        Ok(WebhookOutcome::Processed)
    }

    async fn handle_payment_failed(
        &self,
        payment_intent: PaymentIntentPayload,
    ) -> Result<WebhookOutcome> {
        match self
            .contribution_service
            .fail_by_payment_intent(&payment_intent.id)
            .await?
        {
            Some(contribution) => {
                info!(
                    "Contribution {} now {}",
                    contribution.id, contribution.status
                );
                Ok(WebhookOutcome::Processed)
            }
            None => {
                debug!(
                    "payment_intent.payment_failed: no contribution for {}",
                    payment_intent.id
                );
                Ok(WebhookOutcome::NotFound)
            }
        }
    }

    async fn handle_charge_refunded(&self, charge: ChargePayload) -> Result<WebhookOutcome> {
        let contribution = self
            .contribution_service
            .refund_by_charge(&charge.id, charge.payment_intent.as_deref())
            .await?;

        let Some(contribution) = contribution else {
            warn!("charge.refunded: no contribution for charge {}", charge.id);
            return Ok(WebhookOutcome::NotFound);
        };

        if contribution.status != ContributionStatus::Refunded {
            return Ok(WebhookOutcome::Ignored);
        }

        info!(
            "Contribution {} refunded, deactivating recognition",
            contribution.id
        );
        self.apply_refund_side_effects(&contribution).await?;
        Ok(WebhookOutcome::Processed)
    }

    /// Benefit allocation, sponsorship, and wall refresh for a completed
    /// contribution. Best effort: every step runs, first failure wins.
    async fn apply_completion_side_effects(&self, contribution: &Contribution) -> Result<()> {
        let mut first_err = None;

        if let Err(e) = self
            .benefit_service
            .allocate_for_contribution(contribution)
            .await
        {
            error!(
                "Benefit allocation failed for contribution {}: {}",
                contribution.id, e
            );
            first_err.get_or_insert(e);
        }

        if let Err(e) = self
            .sponsor_service
            .grant_for_contribution(contribution)
            .await
        {
            error!(
                "Sponsor grant failed for contribution {}: {}",
                contribution.id, e
            );
            first_err.get_or_insert(e);
        }

        if contribution.is_public {
            if let Err(e) = self
                .wall_service
                .refresh_for_backer(&contribution.backer_id)
                .await
            {
                error!(
                    "Founders wall refresh failed for backer {}: {}",
                    contribution.backer_id, e
                );
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    /// The refund fan-out mirrors completion: both deactivations and the
    /// wall refresh are attempted even when one fails.
    async fn apply_refund_side_effects(&self, contribution: &Contribution) -> Result<()> {
        let mut first_err = None;

        match self
            .benefit_service
            .deactivate_for_contribution(&contribution.id)
            .await
        {
            Ok(count) => debug!(
                "Deactivated {} benefit allocations for contribution {}",
                count, contribution.id
            ),
            Err(e) => {
                error!(
                    "Benefit deactivation failed for contribution {}: {}",
                    contribution.id, e
                );
                first_err.get_or_insert(e);
            }
        }

        if let Err(e) = self
            .sponsor_service
            .revoke_for_contribution(&contribution.id)
            .await
        {
            error!(
                "Sponsor revocation failed for contribution {}: {}",
                contribution.id, e
            );
            first_err.get_or_insert(e);
        }

        if let Err(e) = self
            .wall_service
            .refresh_for_backer(&contribution.backer_id)
            .await
        {
            error!(
                "Founders wall refresh failed for backer {}: {}",
                contribution.backer_id, e
            );
            first_err.get_or_insert(e);
        }

        match first_err {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl WebhookServiceTrait for WebhookService {
    async fn handle_event(&self, event: StripeEvent) -> Result<WebhookOutcome> {
        match event {
            StripeEvent::CheckoutSessionCompleted(session) => {
                self.handle_checkout_completed(session).await
            }
            StripeEvent::PaymentIntentSucceeded(pi) => self.handle_payment_succeeded(pi).await,
            StripeEvent::PaymentIntentFailed(pi) => self.handle_payment_failed(pi).await,
            StripeEvent::ChargeRefunded(charge) => self.handle_charge_refunded(charge).await,
            StripeEvent::Unrecognized(event_type) => {
                info!("Ignoring unhandled event type: {}", event_type);
                Ok(WebhookOutcome::Ignored)
            }
        }
    }
}
