//! The payment provider webhook endpoint.
//!
//! Contract: 200 `{"received": true}` for everything that was acknowledged
//! (including benign no-ops), 400 for signature or shape problems (the
//! provider must not retry those), 500 for handler failures so the
//! provider's at-least-once redelivery retries the event.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::main_lib::AppState;
use courtfund_core::webhooks::{WebhookError, SIGNATURE_HEADER};

async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Signature first, on the raw body; nothing is parsed before this.
    let Some(signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        warn!("Webhook delivery without a {} header", SIGNATURE_HEADER);
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": WebhookError::MissingSignatureHeader.to_string()})),
        )
            .into_response();
    };

    let event = match state.webhook_verifier.construct_event(&body, signature) {
        Ok(event) => event,
        Err(err) => {
            warn!("Webhook rejected: {}", err);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": err.to_string()})),
            )
                .into_response();
        }
    };

    debug!("Processing event: {}", event.event_type());

    match state.webhook_service.handle_event(event).await {
        Ok(outcome) => {
            debug!("Webhook handled: {:?}", outcome);
            (StatusCode::OK, Json(json!({"received": true}))).into_response()
        }
        Err(err) => {
            error!("Webhook handler failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "webhook handler failed"})),
            )
                .into_response()
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/webhooks/stripe", post(stripe_webhook))
}
