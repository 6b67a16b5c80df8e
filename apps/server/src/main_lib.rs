use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use courtfund_core::{
    backers::{BackerService, BackerServiceTrait},
    benefits::{BenefitService, BenefitServiceTrait},
    campaigns::{CampaignService, CampaignServiceTrait},
    contributions::{ContributionService, ContributionServiceTrait},
    reconciliation::{ReconciliationService, ReconciliationServiceTrait},
    sponsors::{SponsorService, SponsorServiceTrait},
    wall::{WallService, WallServiceTrait},
    webhooks::{WebhookService, WebhookServiceTrait, WebhookVerifier},
};
use courtfund_storage_sqlite::{
    backers::BackerRepository, benefits::BenefitRepository, campaigns::CampaignRepository,
    contributions::ContributionRepository, db, sponsors::SponsorRepository,
    tiers::TierRepository, wall::WallRepository,
};

/// Shared handles built once at startup. Services hold their repositories
/// behind trait objects; no module-level singletons anywhere.
pub struct AppState {
    pub backer_service: Arc<dyn BackerServiceTrait>,
    pub campaign_service: Arc<dyn CampaignServiceTrait>,
    pub contribution_service: Arc<dyn ContributionServiceTrait>,
    pub benefit_service: Arc<dyn BenefitServiceTrait>,
    pub sponsor_service: Arc<dyn SponsorServiceTrait>,
    pub wall_service: Arc<dyn WallServiceTrait>,
    pub webhook_service: Arc<dyn WebhookServiceTrait>,
    pub reconciliation_service: Arc<dyn ReconciliationServiceTrait>,
    pub webhook_verifier: WebhookVerifier,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("CF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let backer_repo = Arc::new(BackerRepository::new(pool.clone(), writer.clone()));
    let campaign_repo = Arc::new(CampaignRepository::new(pool.clone(), writer.clone()));
    let tier_repo = Arc::new(TierRepository::new(pool.clone(), writer.clone()));
    let contribution_repo = Arc::new(ContributionRepository::new(pool.clone(), writer.clone()));
    let benefit_repo = Arc::new(BenefitRepository::new(pool.clone(), writer.clone()));
    let sponsor_repo = Arc::new(SponsorRepository::new(pool.clone(), writer.clone()));
    let wall_repo = Arc::new(WallRepository::new(pool.clone(), writer.clone()));

    let backer_service: Arc<dyn BackerServiceTrait> =
        Arc::new(BackerService::new(backer_repo.clone()));
    let campaign_service: Arc<dyn CampaignServiceTrait> = Arc::new(CampaignService::new(
        campaign_repo.clone(),
        tier_repo.clone(),
    ));
    let contribution_service: Arc<dyn ContributionServiceTrait> =
        Arc::new(ContributionService::new(contribution_repo.clone()));
    let benefit_service: Arc<dyn BenefitServiceTrait> = Arc::new(BenefitService::new(
        benefit_repo.clone(),
        tier_repo.clone(),
    ));
    let sponsor_service: Arc<dyn SponsorServiceTrait> = Arc::new(
        SponsorService::new(sponsor_repo.clone(), backer_repo.clone())
            .with_threshold(config.sponsor_threshold),
    );
    let wall_service: Arc<dyn WallServiceTrait> = Arc::new(WallService::new(
        wall_repo.clone(),
        backer_repo.clone(),
        contribution_repo.clone(),
    ));

    let webhook_service: Arc<dyn WebhookServiceTrait> = Arc::new(WebhookService::new(
        contribution_service.clone(),
        benefit_service.clone(),
        sponsor_service.clone(),
        wall_service.clone(),
    ));
    let reconciliation_service: Arc<dyn ReconciliationServiceTrait> =
        Arc::new(ReconciliationService::new(
            contribution_repo.clone(),
            benefit_service.clone(),
            sponsor_service.clone(),
            wall_service.clone(),
        ));

    let webhook_verifier = WebhookVerifier::new(config.stripe_webhook_secret.clone())
        .with_tolerance(config.signature_tolerance_secs);

    Ok(Arc::new(AppState {
        backer_service,
        campaign_service,
        contribution_service,
        benefit_service,
        sponsor_service,
        wall_service,
        webhook_service,
        reconciliation_service,
        webhook_verifier,
        db_path,
    }))
}
