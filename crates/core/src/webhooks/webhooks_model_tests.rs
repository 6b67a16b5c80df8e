//! Tests for webhook event decoding.

#[cfg(test)]
mod tests {
    use crate::webhooks::{StripeEvent, WebhookError};
    use serde_json::json;

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_parses_checkout_session_completed() {
        let event = StripeEvent::parse(&body(json!({
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_1",
                    "payment_intent": "pi_1",
                    "payment_method_types": ["card"],
                    "metadata": {
                        "contribution_id": "c1",
                        "backer_id": "b1",
                        "tier_id": "t1"
                    }
                }
            }
        })))
        .unwrap();

        let StripeEvent::CheckoutSessionCompleted(session) = event else {
            panic!("expected checkout session event");
        };
        assert_eq!(session.id, "cs_1");
        assert_eq!(session.payment_intent.as_deref(), Some("pi_1"));
        assert_eq!(session.payment_method(), Some("card"));
        assert_eq!(session.metadata.contribution_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_parses_payment_intent_events() {
        let succeeded = StripeEvent::parse(&body(json!({
            "type": "payment_intent.succeeded",
            "data": {"object": {"id": "pi_1", "latest_charge": "ch_1"}}
        })))
        .unwrap();
        let StripeEvent::PaymentIntentSucceeded(pi) = succeeded else {
            panic!("expected payment_intent.succeeded");
        };
        assert_eq!(pi.latest_charge.as_deref(), Some("ch_1"));

        let failed = StripeEvent::parse(&body(json!({
            "type": "payment_intent.payment_failed",
            "data": {"object": {"id": "pi_2"}}
        })))
        .unwrap();
        assert!(matches!(failed, StripeEvent::PaymentIntentFailed(p) if p.id == "pi_2"));
    }

    #[test]
    fn test_parses_charge_refunded() {
        let event = StripeEvent::parse(&body(json!({
            "type": "charge.refunded",
            "data": {"object": {"id": "ch_1", "payment_intent": "pi_1"}}
        })))
        .unwrap();
        assert!(matches!(event, StripeEvent::ChargeRefunded(c) if c.id == "ch_1"));
    }

    #[test]
    fn test_unknown_type_is_unrecognized_not_an_error() {
        let event = StripeEvent::parse(&body(json!({
            "type": "invoice.paid",
            "data": {"object": {"id": "in_1"}}
        })))
        .unwrap();
        assert_eq!(event, StripeEvent::Unrecognized("invoice.paid".to_string()));
        assert_eq!(event.event_type(), "invoice.paid");
    }

    #[test]
    fn test_known_type_with_bad_payload_is_rejected() {
        // checkout.session.completed without the required id.
        let result = StripeEvent::parse(&body(json!({
            "type": "checkout.session.completed",
            "data": {"object": {"payment_intent": "pi_1"}}
        })));
        assert!(matches!(result, Err(WebhookError::MalformedEvent(_))));
    }

    #[test]
    fn test_non_json_body_is_rejected() {
        assert!(matches!(
            StripeEvent::parse(b"not json"),
            Err(WebhookError::MalformedEvent(_))
        ));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let event = StripeEvent::parse(&body(json!({
            "type": "checkout.session.completed",
            "data": {"object": {"id": "cs_1"}}
        })))
        .unwrap();
        let StripeEvent::CheckoutSessionCompleted(session) = event else {
            panic!("expected checkout session event");
        };
        assert_eq!(session.payment_intent, None);
        assert_eq!(session.payment_method(), None);
        assert_eq!(session.metadata.contribution_id, None);
    }
}
