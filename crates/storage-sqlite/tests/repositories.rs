//! Repository tests against a real SQLite database: the multi-table status
//! transitions and the uniqueness constraints the domain layer relies on.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;
use serde_json::json;

use courtfund_core::backers::{BackerRepositoryTrait, NewBacker};
use courtfund_core::benefits::{BenefitRepositoryTrait, NewBenefitAllocation};
use courtfund_core::campaigns::{CampaignRepositoryTrait, NewCampaign};
use courtfund_core::contributions::{
    CompletionUpdate, ContributionRepositoryTrait, ContributionStatus, NewContribution,
};
use courtfund_core::sponsors::{NewCourtSponsor, SponsorRepositoryTrait};
use courtfund_core::tiers::{BenefitDescriptor, NewTier, TierRepositoryTrait};
use courtfund_core::wall::{WallRepositoryTrait, WallUpsert};
use courtfund_storage_sqlite::backers::BackerRepository;
use courtfund_storage_sqlite::benefits::BenefitRepository;
use courtfund_storage_sqlite::campaigns::CampaignRepository;
use courtfund_storage_sqlite::contributions::ContributionRepository;
use courtfund_storage_sqlite::db;
use courtfund_storage_sqlite::sponsors::SponsorRepository;
use courtfund_storage_sqlite::tiers::TierRepository;
use courtfund_storage_sqlite::wall::WallRepository;

struct TestDb {
    pool: Arc<db::DbPool>,
    writer: db::WriteHandle,
    _tmp: tempfile::TempDir,
}

fn setup() -> TestDb {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db_path = tmp
        .path()
        .join("storage-test.db")
        .to_string_lossy()
        .to_string();
    let db_path = db::init(&db_path).expect("init");
    let pool = db::create_pool(&db_path).expect("pool");
    db::run_migrations(&pool).expect("migrations");
    let writer = db::spawn_writer((*pool).clone());
    TestDb {
        pool,
        writer,
        _tmp: tmp,
    }
}

async fn seed_backer(db: &TestDb) -> String {
    let repo = BackerRepository::new(db.pool.clone(), db.writer.clone());
    repo.insert(NewBacker {
        email: "jane@example.com".to_string(),
        first_name: "Jane".to_string(),
        last_initial: "D".to_string(),
        phone: None,
        city: Some("Austin".to_string()),
        state: Some("TX".to_string()),
    })
    .await
    .expect("backer")
    .id
}

async fn seed_campaign_and_tier(db: &TestDb) -> (String, String) {
    let campaign_repo = CampaignRepository::new(db.pool.clone(), db.writer.clone());
    let tier_repo = TierRepository::new(db.pool.clone(), db.writer.clone());
    let campaign = campaign_repo
        .insert(NewCampaign {
            id: None,
            name: "Court Expansion".to_string(),
            slug: "court-expansion".to_string(),
            description: None,
            goal_amount: dec!(50000),
            is_active: true,
            display_order: 0,
        })
        .await
        .expect("campaign");
    let tier = tier_repo
        .insert(NewTier {
            id: None,
            campaign_id: campaign.id.clone(),
            name: "Founding Member".to_string(),
            amount: dec!(250),
            max_backers: Some(10),
            benefits: vec![BenefitDescriptor {
                benefit_type: "t-shirt".to_string(),
                details: Some(json!({"sizes": ["M"]})),
                lifetime: true,
                expires_at: None,
            }],
            is_active: true,
            display_order: 0,
        })
        .await
        .expect("tier");
    (campaign.id, tier.id)
}

async fn seed_pending_contribution(
    db: &TestDb,
    backer_id: &str,
    campaign_id: &str,
    tier_id: &str,
) -> String {
    let repo = ContributionRepository::new(db.pool.clone(), db.writer.clone());
    repo.insert(NewContribution {
        id: None,
        backer_id: backer_id.to_string(),
        campaign_id: campaign_id.to_string(),
        tier_id: Some(tier_id.to_string()),
        amount: dec!(250),
        stripe_checkout_session_id: Some("cs_1".to_string()),
        is_public: true,
        show_amount: true,
        custom_message: None,
    })
    .await
    .expect("contribution")
    .id
}

#[tokio::test]
async fn contribution_insert_and_session_lookup() {
    let db = setup();
    let backer_id = seed_backer(&db).await;
    let (campaign_id, tier_id) = seed_campaign_and_tier(&db).await;
    seed_pending_contribution(&db, &backer_id, &campaign_id, &tier_id).await;

    let repo = ContributionRepository::new(db.pool.clone(), db.writer.clone());
    let found = repo
        .find_by_checkout_session("cs_1")
        .expect("lookup")
        .expect("row");
    assert_eq!(found.status, ContributionStatus::Pending);
    assert_eq!(found.amount, dec!(250));
    assert!(repo
        .find_by_checkout_session("cs_other")
        .expect("lookup")
        .is_none());
}

#[tokio::test]
async fn completion_moves_campaign_total_and_tier_count() {
    let db = setup();
    let backer_id = seed_backer(&db).await;
    let (campaign_id, tier_id) = seed_campaign_and_tier(&db).await;
    let contribution_id =
        seed_pending_contribution(&db, &backer_id, &campaign_id, &tier_id).await;

    let repo = ContributionRepository::new(db.pool.clone(), db.writer.clone());
    let completed = repo
        .mark_completed(
            contribution_id.clone(),
            CompletionUpdate {
                payment_intent_id: Some("pi_1".to_string()),
                charge_id: Some("ch_1".to_string()),
                payment_method: Some("card".to_string()),
            },
        )
        .await
        .expect("completion");

    assert_eq!(completed.status, ContributionStatus::Completed);
    assert!(completed.completed_at.is_some());
    assert_eq!(completed.stripe_charge_id.as_deref(), Some("ch_1"));

    let campaign_repo = CampaignRepository::new(db.pool.clone(), db.writer.clone());
    let campaign = campaign_repo.get_by_id(&campaign_id).expect("campaign");
    assert_eq!(campaign.current_amount, dec!(250));

    let tier_repo = TierRepository::new(db.pool.clone(), db.writer.clone());
    let tier = tier_repo.get_by_id(&tier_id).expect("tier");
    assert_eq!(tier.current_backers, 1);

    // Refund returns both counters to where they started.
    let refunded = repo
        .mark_refunded(contribution_id)
        .await
        .expect("refund");
    assert_eq!(refunded.status, ContributionStatus::Refunded);
    assert!(refunded.refunded_at.is_some());

    let campaign = campaign_repo.get_by_id(&campaign_id).expect("campaign");
    assert_eq!(campaign.current_amount, dec!(0));
    let tier = tier_repo.get_by_id(&tier_id).expect("tier");
    assert_eq!(tier.current_backers, 0);
}

#[tokio::test]
async fn duplicate_benefit_allocation_maps_to_unique_violation() {
    let db = setup();
    let backer_id = seed_backer(&db).await;
    let (campaign_id, tier_id) = seed_campaign_and_tier(&db).await;
    let contribution_id =
        seed_pending_contribution(&db, &backer_id, &campaign_id, &tier_id).await;

    let repo = BenefitRepository::new(db.pool.clone(), db.writer.clone());
    let allocation = NewBenefitAllocation {
        backer_id: backer_id.clone(),
        contribution_id: contribution_id.clone(),
        benefit_type: "t-shirt".to_string(),
        benefit_details: json!({"sizes": ["M"]}),
        expires_at: None,
    };

    repo.insert(allocation.clone()).await.expect("first insert");
    let err = repo
        .insert(allocation)
        .await
        .expect_err("second insert must violate uniqueness");
    assert!(err.is_unique_violation());

    let active = repo.list_active_for_backer(&backer_id).expect("list");
    assert_eq!(active.len(), 1);

    let touched = repo
        .deactivate_for_contribution(&contribution_id)
        .await
        .expect("deactivate");
    assert_eq!(touched, 1);
    assert!(repo
        .list_active_for_backer(&backer_id)
        .expect("list")
        .is_empty());
}

#[tokio::test]
async fn duplicate_backer_email_maps_to_unique_violation() {
    let db = setup();
    seed_backer(&db).await;

    let repo = BackerRepository::new(db.pool.clone(), db.writer.clone());
    let err = repo
        .insert(NewBacker {
            email: "jane@example.com".to_string(),
            first_name: "Janet".to_string(),
            last_initial: "D".to_string(),
            phone: None,
            city: None,
            state: None,
        })
        .await
        .expect_err("duplicate email must violate uniqueness");
    assert!(err.is_unique_violation());
}

#[tokio::test]
async fn sponsor_uniqueness_is_per_contribution() {
    let db = setup();
    let backer_id = seed_backer(&db).await;
    let (campaign_id, tier_id) = seed_campaign_and_tier(&db).await;
    let contribution_id =
        seed_pending_contribution(&db, &backer_id, &campaign_id, &tier_id).await;

    let repo = SponsorRepository::new(db.pool.clone(), db.writer.clone());
    let new_sponsor = NewCourtSponsor {
        backer_id: backer_id.clone(),
        contribution_id: contribution_id.clone(),
        sponsor_name: "Jane D.".to_string(),
        sponsor_type: "individual".to_string(),
        sponsorship_start: Utc::now().date_naive(),
    };

    repo.insert(new_sponsor.clone()).await.expect("insert");
    let err = repo
        .insert(new_sponsor)
        .await
        .expect_err("one sponsor per contribution");
    assert!(err.is_unique_violation());

    assert_eq!(repo.list_active().expect("list").len(), 1);
    repo.deactivate_for_contribution(&contribution_id)
        .await
        .expect("deactivate");
    assert!(repo.list_active().expect("list").is_empty());
    // The row survives deactivation.
    assert!(repo
        .find_by_contribution(&contribution_id)
        .expect("find")
        .is_some());
}

#[tokio::test]
async fn wall_upsert_is_keyed_by_backer() {
    let db = setup();
    let backer_id = seed_backer(&db).await;

    let repo = WallRepository::new(db.pool.clone(), db.writer.clone());
    let first = repo
        .upsert(WallUpsert {
            backer_id: backer_id.clone(),
            display_name: "Jane D.".to_string(),
            location: Some("Austin, TX".to_string()),
            total_contributed: dec!(250),
            is_active: true,
        })
        .await
        .expect("first upsert");

    let second = repo
        .upsert(WallUpsert {
            backer_id: backer_id.clone(),
            display_name: "Jane D.".to_string(),
            location: Some("Austin, TX".to_string()),
            total_contributed: dec!(1750),
            is_active: true,
        })
        .await
        .expect("second upsert");

    assert_eq!(first.id, second.id);
    assert_eq!(second.total_contributed, dec!(1750));
    assert_eq!(repo.list_active().expect("list").len(), 1);
}

#[tokio::test]
async fn open_tiers_exclude_full_ones() {
    let db = setup();
    let (campaign_id, _tier_id) = seed_campaign_and_tier(&db).await;

    let tier_repo = TierRepository::new(db.pool.clone(), db.writer.clone());
    tier_repo
        .insert(NewTier {
            id: None,
            campaign_id: campaign_id.clone(),
            name: "Sold Out".to_string(),
            amount: dec!(100),
            max_backers: Some(0),
            benefits: vec![],
            is_active: true,
            display_order: 1,
        })
        .await
        .expect("full tier");

    let open = tier_repo
        .list_open_for_campaign(&campaign_id)
        .expect("open tiers");
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].name, "Founding Member");
}

#[tokio::test]
async fn public_completed_sum_ignores_private_and_pending() {
    let db = setup();
    let backer_id = seed_backer(&db).await;
    let (campaign_id, tier_id) = seed_campaign_and_tier(&db).await;

    let repo = ContributionRepository::new(db.pool.clone(), db.writer.clone());

    // Completed public.
    let c1 = seed_pending_contribution(&db, &backer_id, &campaign_id, &tier_id).await;
    repo.mark_completed(c1, CompletionUpdate::default())
        .await
        .expect("complete");

    // Completed private.
    let c2 = repo
        .insert(NewContribution {
            id: None,
            backer_id: backer_id.clone(),
            campaign_id: campaign_id.clone(),
            tier_id: None,
            amount: dec!(400),
            stripe_checkout_session_id: None,
            is_public: false,
            show_amount: true,
            custom_message: None,
        })
        .await
        .expect("private")
        .id;
    repo.mark_completed(c2, CompletionUpdate::default())
        .await
        .expect("complete");

    // Still pending.
    repo.insert(NewContribution {
        id: None,
        backer_id: backer_id.clone(),
        campaign_id,
        tier_id: None,
        amount: dec!(999),
        stripe_checkout_session_id: None,
        is_public: true,
        show_amount: true,
        custom_message: None,
    })
    .await
    .expect("pending");

    let total = repo
        .sum_completed_public_by_backer(&backer_id)
        .expect("sum");
    assert_eq!(total, dec!(250));

    let listed = repo.list_public_completed(None).expect("list");
    assert_eq!(listed.len(), 1);
}
