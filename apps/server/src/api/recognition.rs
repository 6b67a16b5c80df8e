//! Public recognition listings and the reconciliation trigger.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::{error::ApiResult, main_lib::AppState};
use courtfund_core::reconciliation::ReconciliationSummary;
use courtfund_core::sponsors::CourtSponsor;
use courtfund_core::wall::FoundersWallEntry;

async fn get_founders_wall(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<FoundersWallEntry>>> {
    let entries = state.wall_service.list_active()?;
    Ok(Json(entries))
}

async fn get_court_sponsors(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CourtSponsor>>> {
    let sponsors = state.sponsor_service.list_active()?;
    Ok(Json(sponsors))
}

/// Manual trigger for the sweep the scheduler runs periodically.
async fn run_reconciliation(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReconciliationSummary>> {
    let summary = state.reconciliation_service.run_sweep().await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/founders-wall", get(get_founders_wall))
        .route("/court-sponsors", get(get_court_sponsors))
        .route("/reconciliation/run", post(run_reconciliation))
}
