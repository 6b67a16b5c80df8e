//! Backer lookup and benefit listing.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use courtfund_core::backers::Backer;
use courtfund_core::benefits::BenefitAllocation;

#[derive(Deserialize)]
struct SearchQuery {
    email: String,
}

async fn search_backer(
    Query(query): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Backer>> {
    let backer = state
        .backer_service
        .find_by_email(&query.email)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(backer))
}

async fn get_backer_benefits(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BenefitAllocation>>> {
    let benefits = state.benefit_service.get_active_for_backer(&id)?;
    Ok(Json(benefits))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/backers/search", get(search_backer))
        .route("/backers/{id}/benefits", get(get_backer_benefits))
}
