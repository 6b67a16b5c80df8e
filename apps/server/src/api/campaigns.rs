//! Public campaign listings.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{error::ApiResult, main_lib::AppState};
use courtfund_core::campaigns::{CampaignDetail, CampaignWithProgress};

async fn list_campaigns(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CampaignWithProgress>>> {
    let campaigns = state.campaign_service.list_active_with_progress()?;
    Ok(Json(campaigns))
}

async fn get_campaign(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CampaignDetail>> {
    let detail = state.campaign_service.get_campaign_detail(&id)?;
    Ok(Json(detail))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/campaigns", get(list_campaigns))
        .route("/campaigns/{id}", get(get_campaign))
}
