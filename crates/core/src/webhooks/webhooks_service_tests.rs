//! Tests for the webhook dispatcher's routing and fan-out policy.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use crate::benefits::{BenefitAllocation, BenefitServiceTrait};
    use crate::contributions::{
        CompletionUpdate, Contribution, ContributionServiceTrait, ContributionStatus,
        NewContribution,
    };
    use crate::errors::DatabaseError;
    use crate::sponsors::{CourtSponsor, SponsorServiceTrait};
    use crate::wall::{FoundersWallEntry, WallServiceTrait};
    use crate::webhooks::{
        ChargePayload, CheckoutSessionPayload, StripeEvent, WebhookOutcome, WebhookService,
        WebhookServiceTrait,
    };
    use crate::Result;

    fn contribution(status: ContributionStatus) -> Contribution {
        Contribution {
            id: "c1".to_string(),
            backer_id: "b1".to_string(),
            campaign_id: "camp1".to_string(),
            tier_id: Some("t1".to_string()),
            amount: dec!(1500),
            status,
            stripe_payment_intent_id: Some("pi_1".to_string()),
            stripe_charge_id: Some("ch_1".to_string()),
            stripe_checkout_session_id: Some("cs_1".to_string()),
            payment_method: Some("card".to_string()),
            completed_at: None,
            refunded_at: None,
            is_public: true,
            show_amount: true,
            custom_message: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    // --- Mock ContributionService ---
    struct MockContributionService {
        // Row returned by every lookup; None simulates read-after-write lag.
        row: Mutex<Option<Contribution>>,
    }

    impl MockContributionService {
        fn returning(row: Option<Contribution>) -> Arc<Self> {
            Arc::new(Self {
                row: Mutex::new(row),
            })
        }
    }

    #[async_trait]
    impl ContributionServiceTrait for MockContributionService {
        async fn create_pending(&self, _new: NewContribution) -> Result<Contribution> {
            unimplemented!()
        }

        fn get_by_checkout_session(&self, _session_id: &str) -> Result<Option<Contribution>> {
            unimplemented!()
        }

        fn list_public_completed(&self, _campaign_id: Option<&str>) -> Result<Vec<Contribution>> {
            unimplemented!()
        }

        async fn complete_by_checkout_session(
            &self,
            _session_id: &str,
            _update: CompletionUpdate,
        ) -> Result<Option<Contribution>> {
            Ok(self.row.lock().unwrap().clone())
        }

        async fn complete_by_id(
            &self,
            _contribution_id: &str,
            _update: CompletionUpdate,
        ) -> Result<Option<Contribution>> {
            Ok(self.row.lock().unwrap().clone())
        }

        async fn complete_by_payment_intent(
            &self,
            _payment_intent_id: &str,
            _charge_id: Option<String>,
        ) -> Result<Option<Contribution>> {
            Ok(self.row.lock().unwrap().clone())
        }

        async fn fail_by_payment_intent(
            &self,
            _payment_intent_id: &str,
        ) -> Result<Option<Contribution>> {
            Ok(self.row.lock().unwrap().clone())
        }

        async fn refund_by_charge(
            &self,
            _charge_id: &str,
            _payment_intent_id: Option<&str>,
        ) -> Result<Option<Contribution>> {
            Ok(self.row.lock().unwrap().clone())
        }
    }

    // --- Mock side-effect services with call counters ---
    #[derive(Default)]
    struct MockBenefitService {
        allocate_calls: AtomicUsize,
        deactivate_calls: AtomicUsize,
        fail_allocate: AtomicBool,
    }

    #[async_trait]
    impl BenefitServiceTrait for MockBenefitService {
        async fn allocate_for_contribution(
            &self,
            _contribution: &Contribution,
        ) -> Result<Vec<BenefitAllocation>> {
            self.allocate_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_allocate.load(Ordering::SeqCst) {
                return Err(DatabaseError::QueryFailed("allocator down".into()).into());
            }
            Ok(Vec::new())
        }

        async fn deactivate_for_contribution(&self, _contribution_id: &str) -> Result<usize> {
            self.deactivate_calls.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        }

        fn get_active_for_backer(&self, _backer_id: &str) -> Result<Vec<BenefitAllocation>> {
            unimplemented!()
        }
    }

    #[derive(Default)]
    struct MockSponsorService {
        grant_calls: AtomicUsize,
        revoke_calls: AtomicUsize,
    }

    #[async_trait]
    impl SponsorServiceTrait for MockSponsorService {
        async fn grant_for_contribution(
            &self,
            _contribution: &Contribution,
        ) -> Result<Option<CourtSponsor>> {
            self.grant_calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        async fn revoke_for_contribution(&self, _contribution_id: &str) -> Result<usize> {
            self.revoke_calls.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        }

        fn list_active(&self) -> Result<Vec<CourtSponsor>> {
            unimplemented!()
        }
    }

    #[derive(Default)]
    struct MockWallService {
        refresh_calls: AtomicUsize,
    }

    #[async_trait]
    impl WallServiceTrait for MockWallService {
        async fn refresh_for_backer(
            &self,
            _backer_id: &str,
        ) -> Result<Option<FoundersWallEntry>> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        fn list_active(&self) -> Result<Vec<FoundersWallEntry>> {
            unimplemented!()
        }
    }

    struct Harness {
        service: WebhookService,
        benefits: Arc<MockBenefitService>,
        sponsors: Arc<MockSponsorService>,
        wall: Arc<MockWallService>,
    }

    fn harness(row: Option<Contribution>) -> Harness {
        let benefits = Arc::new(MockBenefitService::default());
        let sponsors = Arc::new(MockSponsorService::default());
        let wall = Arc::new(MockWallService::default());
        let service = WebhookService::new(
            MockContributionService::returning(row),
            benefits.clone(),
            sponsors.clone(),
            wall.clone(),
        );
        Harness {
            service,
            benefits,
            sponsors,
            wall,
        }
    }

    fn checkout_event() -> StripeEvent {
        StripeEvent::CheckoutSessionCompleted(CheckoutSessionPayload {
            id: "cs_1".to_string(),
            payment_intent: Some("pi_1".to_string()),
            payment_method_types: vec!["card".to_string()],
            metadata: Default::default(),
        })
    }

    #[tokio::test]
    async fn test_completed_session_triggers_full_fan_out() {
        let h = harness(Some(contribution(ContributionStatus::Completed)));

        let outcome = h.service.handle_event(checkout_event()).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::Processed);
        assert_eq!(h.benefits.allocate_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.sponsors.grant_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.wall.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_contribution_is_acknowledged_not_failed() {
        let h = harness(None);

        let outcome = h.service.handle_event(checkout_event()).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::NotFound);
        assert_eq!(h.benefits.allocate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_terminal_row_skips_side_effects() {
        // Success event for a contribution that was already refunded.
        let h = harness(Some(contribution(ContributionStatus::Refunded)));

        let outcome = h.service.handle_event(checkout_event()).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::Ignored);
        assert_eq!(h.benefits.allocate_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.sponsors.grant_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_allocator_failure_does_not_skip_siblings() {
        let h = harness(Some(contribution(ContributionStatus::Completed)));
        h.benefits.fail_allocate.store(true, Ordering::SeqCst);

        let result = h.service.handle_event(checkout_event()).await;

        // Error surfaces so the provider redelivers...
        assert!(result.is_err());
        // ...but the sponsor and wall steps still ran.
        assert_eq!(h.sponsors.grant_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.wall.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_private_contribution_skips_wall() {
        let mut row = contribution(ContributionStatus::Completed);
        row.is_public = false;
        let h = harness(Some(row));

        h.service.handle_event(checkout_event()).await.unwrap();

        assert_eq!(h.wall.refresh_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.benefits.allocate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refund_deactivates_both_recognition_records() {
        let h = harness(Some(contribution(ContributionStatus::Refunded)));

        let outcome = h
            .service
            .handle_event(StripeEvent::ChargeRefunded(ChargePayload {
                id: "ch_1".to_string(),
                payment_intent: Some("pi_1".to_string()),
            }))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Processed);
        assert_eq!(h.benefits.deactivate_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.sponsors.revoke_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.wall.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_event_is_ignored() {
        let h = harness(Some(contribution(ContributionStatus::Completed)));

        let outcome = h
            .service
            .handle_event(StripeEvent::Unrecognized("invoice.paid".to_string()))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Ignored);
        assert_eq!(h.benefits.allocate_calls.load(Ordering::SeqCst), 0);
    }
}
