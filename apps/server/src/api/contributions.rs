//! Contribution intake and success-page lookup.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use courtfund_core::backers::NewBacker;
use courtfund_core::contributions::{Contribution, NewContribution};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateContributionRequest {
    backer: NewBacker,
    contribution: ContributionIntake,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionIntake {
    campaign_id: String,
    tier_id: Option<String>,
    amount: Decimal,
    /// Provider checkout session id minted by the upstream checkout
    /// integration.
    checkout_session_id: Option<String>,
    #[serde(default = "default_true")]
    is_public: bool,
    #[serde(default = "default_true")]
    show_amount: bool,
    custom_message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Records the pending half of a checkout: get-or-create the backer, then
/// the pending contribution the webhook flow will later transition.
async fn create_contribution(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateContributionRequest>,
) -> ApiResult<Json<Contribution>> {
    let backer = state.backer_service.get_or_create(payload.backer).await?;
    let intake = payload.contribution;
    let contribution = state
        .contribution_service
        .create_pending(NewContribution {
            id: None,
            backer_id: backer.id,
            campaign_id: intake.campaign_id,
            tier_id: intake.tier_id,
            amount: intake.amount,
            stripe_checkout_session_id: intake.checkout_session_id,
            is_public: intake.is_public,
            show_amount: intake.show_amount,
            custom_message: intake.custom_message,
        })
        .await?;
    Ok(Json(contribution))
}

async fn get_contribution_by_session(
    Path(session_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Contribution>> {
    let contribution = state
        .contribution_service
        .get_by_checkout_session(&session_id)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(contribution))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    campaign_id: Option<String>,
}

async fn list_public_contributions(
    Query(query): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Contribution>>> {
    let contributions = state
        .contribution_service
        .list_public_completed(query.campaign_id.as_deref())?;
    Ok(Json(contributions))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/contributions",
            get(list_public_contributions).post(create_contribution),
        )
        .route(
            "/contributions/{session_id}",
            get(get_contribution_by_session),
        )
}
