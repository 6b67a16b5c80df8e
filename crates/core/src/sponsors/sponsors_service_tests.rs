//! Tests for the court sponsor engine.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::backers::{Backer, BackerRepositoryTrait, NewBacker};
    use crate::contributions::{Contribution, ContributionStatus};
    use crate::errors::DatabaseError;
    use crate::sponsors::{
        CourtSponsor, NewCourtSponsor, SponsorRepositoryTrait, SponsorService,
        SponsorServiceTrait,
    };
    use crate::Result;

    // --- Mock SponsorRepository ---
    #[derive(Default)]
    struct MockSponsorRepository {
        sponsors: Mutex<Vec<CourtSponsor>>,
    }

    #[async_trait]
    impl SponsorRepositoryTrait for MockSponsorRepository {
        fn find_by_contribution(&self, contribution_id: &str) -> Result<Option<CourtSponsor>> {
            Ok(self
                .sponsors
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.contribution_id == contribution_id)
                .cloned())
        }

        fn list_active(&self) -> Result<Vec<CourtSponsor>> {
            Ok(self
                .sponsors
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.is_active)
                .cloned()
                .collect())
        }

        async fn insert(&self, new_sponsor: NewCourtSponsor) -> Result<CourtSponsor> {
            let mut rows = self.sponsors.lock().unwrap();
            if rows
                .iter()
                .any(|s| s.contribution_id == new_sponsor.contribution_id)
            {
                return Err(
                    DatabaseError::UniqueViolation(new_sponsor.contribution_id).into(),
                );
            }
            let sponsor = CourtSponsor {
                id: format!("sponsor-{}", rows.len()),
                backer_id: new_sponsor.backer_id,
                contribution_id: new_sponsor.contribution_id,
                sponsor_name: new_sponsor.sponsor_name,
                sponsor_type: new_sponsor.sponsor_type,
                court_number: None,
                logo_url: None,
                sponsorship_start: new_sponsor.sponsorship_start,
                sponsorship_end: None,
                is_active: true,
                created_at: Utc::now().naive_utc(),
            };
            rows.push(sponsor.clone());
            Ok(sponsor)
        }

        async fn deactivate_for_contribution(&self, contribution_id: &str) -> Result<usize> {
            let mut rows = self.sponsors.lock().unwrap();
            let mut touched = 0;
            for row in rows.iter_mut().filter(|s| s.contribution_id == contribution_id) {
                row.is_active = false;
                touched += 1;
            }
            Ok(touched)
        }
    }

    // --- Mock BackerRepository ---
    struct MockBackerRepository {
        backer: Backer,
    }

    #[async_trait]
    impl BackerRepositoryTrait for MockBackerRepository {
        fn get_by_id(&self, backer_id: &str) -> Result<Backer> {
            if self.backer.id == backer_id {
                Ok(self.backer.clone())
            } else {
                Err(DatabaseError::NotFound(backer_id.to_string()).into())
            }
        }

        fn find_by_email(&self, _email: &str) -> Result<Option<Backer>> {
            unimplemented!()
        }

        async fn insert(&self, _new_backer: NewBacker) -> Result<Backer> {
            unimplemented!()
        }
    }

    fn jane() -> Backer {
        Backer {
            id: "b1".to_string(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_initial: "D".to_string(),
            phone: None,
            city: None,
            state: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    fn completed_contribution(amount: Decimal) -> Contribution {
        Contribution {
            id: "c1".to_string(),
            backer_id: "b1".to_string(),
            campaign_id: "camp1".to_string(),
            tier_id: None,
            amount,
            status: ContributionStatus::Completed,
            stripe_payment_intent_id: Some("pi_1".to_string()),
            stripe_charge_id: None,
            stripe_checkout_session_id: Some("cs_1".to_string()),
            payment_method: Some("card".to_string()),
            completed_at: Some(Utc::now().naive_utc()),
            refunded_at: None,
            is_public: true,
            show_amount: true,
            custom_message: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    fn engine(repo: Arc<MockSponsorRepository>) -> SponsorService {
        SponsorService::new(repo, Arc::new(MockBackerRepository { backer: jane() }))
    }

    #[tokio::test]
    async fn test_qualifying_contribution_creates_sponsor() {
        let repo = Arc::new(MockSponsorRepository::default());
        let svc = engine(repo.clone());

        let sponsor = svc
            .grant_for_contribution(&completed_contribution(dec!(1500)))
            .await
            .unwrap()
            .expect("sponsor expected at 1500");

        assert_eq!(sponsor.sponsor_name, "Jane D.");
        assert_eq!(sponsor.sponsor_type, "individual");
        assert!(sponsor.is_active);
    }

    #[tokio::test]
    async fn test_threshold_is_inclusive() {
        let repo = Arc::new(MockSponsorRepository::default());
        let svc = engine(repo.clone());

        let sponsor = svc
            .grant_for_contribution(&completed_contribution(dec!(1000)))
            .await
            .unwrap();
        assert!(sponsor.is_some());
    }

    #[tokio::test]
    async fn test_below_threshold_creates_nothing() {
        let repo = Arc::new(MockSponsorRepository::default());
        let svc = engine(repo.clone());

        let sponsor = svc
            .grant_for_contribution(&completed_contribution(dec!(999.99)))
            .await
            .unwrap();
        assert!(sponsor.is_none());
        assert!(repo.sponsors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_redelivery_keeps_a_single_sponsor() {
        let repo = Arc::new(MockSponsorRepository::default());
        let svc = engine(repo.clone());
        let contribution = completed_contribution(dec!(1500));

        for _ in 0..3 {
            svc.grant_for_contribution(&contribution).await.unwrap();
        }

        assert_eq!(repo.sponsors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_custom_threshold_applies() {
        let repo = Arc::new(MockSponsorRepository::default());
        let svc = engine(repo.clone()).with_threshold(dec!(500));

        let sponsor = svc
            .grant_for_contribution(&completed_contribution(dec!(600)))
            .await
            .unwrap();
        assert!(sponsor.is_some());
    }

    #[tokio::test]
    async fn test_revoke_deactivates_but_preserves_history() {
        let repo = Arc::new(MockSponsorRepository::default());
        let svc = engine(repo.clone());
        svc.grant_for_contribution(&completed_contribution(dec!(1500)))
            .await
            .unwrap();

        let touched = svc.revoke_for_contribution("c1").await.unwrap();
        assert_eq!(touched, 1);

        let rows = repo.sponsors.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_active);
    }
}
