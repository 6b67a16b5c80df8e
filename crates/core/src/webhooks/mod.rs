//! Webhooks module - provider event model, signature verification, and the
//! dispatcher that drives the contribution flow.

mod signature;
mod webhooks_errors;
mod webhooks_model;
mod webhooks_service;

#[cfg(test)]
mod webhooks_model_tests;

#[cfg(test)]
mod webhooks_service_tests;

pub use signature::{WebhookVerifier, DEFAULT_TOLERANCE_SECS, SIGNATURE_HEADER};
pub use webhooks_errors::WebhookError;
pub use webhooks_model::{
    ChargePayload, CheckoutSessionPayload, PaymentIntentPayload, SessionMetadata, StripeEvent,
};
pub use webhooks_service::{WebhookOutcome, WebhookService, WebhookServiceTrait};
