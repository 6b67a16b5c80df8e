use super::contributions_model::*;
use crate::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait defining the contract for Contribution repository operations.
///
/// The mark_* mutations also keep the campaign running total and tier
/// backer count in step with the status, inside the same transaction.
#[async_trait]
pub trait ContributionRepositoryTrait: Send + Sync {
    fn get_by_id(&self, contribution_id: &str) -> Result<Contribution>;
    fn find_by_checkout_session(&self, session_id: &str) -> Result<Option<Contribution>>;
    fn find_by_payment_intent(&self, payment_intent_id: &str) -> Result<Option<Contribution>>;
    fn find_by_charge(&self, charge_id: &str) -> Result<Option<Contribution>>;
    fn list_by_status(&self, status: ContributionStatus) -> Result<Vec<Contribution>>;
    /// Completed public contributions, newest first.
    fn list_public_completed(&self, campaign_id: Option<&str>) -> Result<Vec<Contribution>>;
    /// Sum of a backer's completed public contribution amounts.
    fn sum_completed_public_by_backer(&self, backer_id: &str) -> Result<Decimal>;
    async fn insert(&self, new_contribution: NewContribution) -> Result<Contribution>;
    async fn mark_completed(
        &self,
        contribution_id: String,
        update: CompletionUpdate,
    ) -> Result<Contribution>;
    async fn mark_failed(&self, contribution_id: String) -> Result<Contribution>;
    async fn mark_refunded(&self, contribution_id: String) -> Result<Contribution>;
    /// Backfills the charge id on an already-completed row.
    async fn record_charge(&self, contribution_id: String, charge_id: String)
        -> Result<Contribution>;
}

/// Trait defining the contract for Contribution service operations.
///
/// The transition operations return `Ok(None)` when the lookup key does not
/// resolve to a contribution yet (read-after-write lag at the provider);
/// callers log and acknowledge, relying on provider redelivery.
#[async_trait]
pub trait ContributionServiceTrait: Send + Sync {
    async fn create_pending(&self, new_contribution: NewContribution) -> Result<Contribution>;
    fn get_by_checkout_session(&self, session_id: &str) -> Result<Option<Contribution>>;
    fn list_public_completed(&self, campaign_id: Option<&str>) -> Result<Vec<Contribution>>;
    async fn complete_by_checkout_session(
        &self,
        session_id: &str,
        update: CompletionUpdate,
    ) -> Result<Option<Contribution>>;
    /// Fallback completion path when only the contribution id is known
    /// (session metadata), e.g. for providers that omit the session lookup.
    async fn complete_by_id(
        &self,
        contribution_id: &str,
        update: CompletionUpdate,
    ) -> Result<Option<Contribution>>;
    async fn complete_by_payment_intent(
        &self,
        payment_intent_id: &str,
        charge_id: Option<String>,
    ) -> Result<Option<Contribution>>;
    async fn fail_by_payment_intent(&self, payment_intent_id: &str)
        -> Result<Option<Contribution>>;
    /// Looks up by charge id, falling back to the payment intent id when the
    /// charge was never backfilled onto the row.
    async fn refund_by_charge(
        &self,
        charge_id: &str,
        payment_intent_id: Option<&str>,
    ) -> Result<Option<Contribution>>;
}
