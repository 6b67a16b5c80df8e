//! Provider webhook event model.
//!
//! The wire format is the provider's event envelope
//! `{"type": ..., "data": {"object": ...}}`. Rather than poking at loose
//! JSON, the receiver decodes into this closed union: the four event kinds
//! the flow acts on, each with a validated payload shape, plus an explicit
//! catch-all for everything else.

use serde::Deserialize;

use super::webhooks_errors::WebhookError;

pub const EVENT_CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";
pub const EVENT_PAYMENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";
pub const EVENT_PAYMENT_INTENT_FAILED: &str = "payment_intent.payment_failed";
pub const EVENT_CHARGE_REFUNDED: &str = "charge.refunded";

/// Checkout session metadata attached when the session was created.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionMetadata {
    #[serde(default)]
    pub contribution_id: Option<String>,
    #[serde(default)]
    pub backer_id: Option<String>,
    #[serde(default)]
    pub tier_id: Option<String>,
}

/// Payload of `checkout.session.completed`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckoutSessionPayload {
    pub id: String,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub payment_method_types: Vec<String>,
    #[serde(default)]
    pub metadata: SessionMetadata,
}

impl CheckoutSessionPayload {
    /// First offered payment method, the provider's convention for "what
    /// the customer paid with".
    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method_types.first().map(String::as_str)
    }
}

/// Payload of the `payment_intent.*` events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentIntentPayload {
    pub id: String,
    #[serde(default)]
    pub latest_charge: Option<String>,
}

/// Payload of `charge.refunded`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChargePayload {
    pub id: String,
    #[serde(default)]
    pub payment_intent: Option<String>,
}

/// A verified, decoded provider event.
#[derive(Debug, Clone, PartialEq)]
pub enum StripeEvent {
    CheckoutSessionCompleted(CheckoutSessionPayload),
    PaymentIntentSucceeded(PaymentIntentPayload),
    PaymentIntentFailed(PaymentIntentPayload),
    ChargeRefunded(ChargePayload),
    /// Event types the flow does not act on. Logged and acknowledged so the
    /// provider does not retry content we cannot handle.
    Unrecognized(String),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    event_type: String,
    data: DataEnvelope,
}

#[derive(Deserialize)]
struct DataEnvelope {
    object: serde_json::Value,
}

fn decode<T: serde::de::DeserializeOwned>(
    event_type: &str,
    object: serde_json::Value,
) -> Result<T, WebhookError> {
    serde_json::from_value(object)
        .map_err(|e| WebhookError::MalformedEvent(format!("{}: {}", event_type, e)))
}

impl StripeEvent {
    /// Decodes a raw (already signature-verified) event body.
    ///
    /// A known event type with a payload that does not match its shape is an
    /// error; unknown event types decode to [`StripeEvent::Unrecognized`].
    pub fn parse(body: &[u8]) -> Result<Self, WebhookError> {
        let envelope: Envelope = serde_json::from_slice(body)
            .map_err(|e| WebhookError::MalformedEvent(e.to_string()))?;
        let Envelope { event_type, data } = envelope;
        if event_type == EVENT_CHECKOUT_SESSION_COMPLETED {
            decode(&event_type, data.object).map(StripeEvent::CheckoutSessionCompleted)
        } else if event_type == EVENT_PAYMENT_INTENT_SUCCEEDED {
            decode(&event_type, data.object).map(StripeEvent::PaymentIntentSucceeded)
        } else if event_type == EVENT_PAYMENT_INTENT_FAILED {
            decode(&event_type, data.object).map(StripeEvent::PaymentIntentFailed)
        } else if event_type == EVENT_CHARGE_REFUNDED {
            decode(&event_type, data.object).map(StripeEvent::ChargeRefunded)
        } else {
            Ok(StripeEvent::Unrecognized(event_type))
        }
    }

    pub fn event_type(&self) -> &str {
        match self {
            StripeEvent::CheckoutSessionCompleted(_) => EVENT_CHECKOUT_SESSION_COMPLETED,
            StripeEvent::PaymentIntentSucceeded(_) => EVENT_PAYMENT_INTENT_SUCCEEDED,
            StripeEvent::PaymentIntentFailed(_) => EVENT_PAYMENT_INTENT_FAILED,
            StripeEvent::ChargeRefunded(_) => EVENT_CHARGE_REFUNDED,
            StripeEvent::Unrecognized(t) => t,
        }
    }
}
