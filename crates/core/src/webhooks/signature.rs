//! Provider webhook signature verification.
//!
//! The provider signs each delivery with
//! `stripe-signature: t=<unix>,v1=<hex hmac>` where the HMAC-SHA256 is
//! computed over `"{t}.{raw body}"` with the shared endpoint secret.
//! Verification runs BEFORE any JSON parsing so unverified content is never
//! processed, and rejects stale timestamps to blunt replay.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::webhooks_errors::WebhookError;
use super::webhooks_model::StripeEvent;

type HmacSha256 = Hmac<Sha256>;

/// Name of the signature header on inbound deliveries.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum accepted age (and clock skew) of a signed timestamp.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Verifies webhook deliveries against the shared endpoint secret.
///
/// Built once at startup and shared; holds no per-request state.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verifies the signature and decodes the event, in that order.
    pub fn construct_event(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, WebhookError> {
        self.verify_at(payload, signature_header, Utc::now().timestamp())?;
        StripeEvent::parse(payload)
    }

    /// Signature check against a caller-supplied clock.
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<(), WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        let age_secs = (now - header.timestamp).abs();
        if age_secs > self.tolerance_secs {
            return Err(WebhookError::StaleTimestamp { age_secs });
        }

        for candidate in &header.signatures {
            let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
                .expect("HMAC can take key of any size");
            mac.update(header.timestamp.to_string().as_bytes());
            mac.update(b".");
            mac.update(payload);
            // verify_slice is constant-time.
            if mac.verify_slice(candidate).is_ok() {
                return Ok(());
            }
        }
        Err(WebhookError::SignatureMismatch)
    }
}

/// Parsed `t=...,v1=...` header. Multiple v1 entries are allowed (the
/// provider sends several during secret rotation).
struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.trim().split_once('=') else {
                continue;
            };
            match key {
                "t" => {
                    timestamp = Some(value.parse::<i64>().map_err(|_| {
                        WebhookError::MalformedSignatureHeader(format!(
                            "invalid timestamp '{}'",
                            value
                        ))
                    })?);
                }
                "v1" => {
                    // Bad hex cannot possibly match; skip rather than fail
                    // so one broken entry doesn't mask a valid one.
                    if let Ok(decoded) = hex::decode(value) {
                        signatures.push(decoded);
                    }
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            WebhookError::MalformedSignatureHeader("missing 't' element".into())
        })?;
        if signatures.is_empty() {
            return Err(WebhookError::MalformedSignatureHeader(
                "missing 'v1' element".into(),
            ));
        }
        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhooks::WebhookError;

    const SECRET: &str = "whsec_test123secret456";

    fn sign(payload: &[u8], secret: &str, timestamp: i64) -> String {
        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
        mac.update(format!("{}.", timestamp).as_bytes());
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new(SECRET)
    }

    #[test]
    fn test_accepts_valid_signature() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let now = 1_700_000_000;
        let header = format!("t={},v1={}", now, sign(payload, SECRET, now));
        assert!(verifier().verify_at(payload, &header, now).is_ok());
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let now = 1_700_000_000;
        let header = format!("t={},v1={}", now, sign(payload, "wrong_secret", now));
        assert!(matches!(
            verifier().verify_at(payload, &header, now),
            Err(WebhookError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_rejects_modified_payload() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let tampered = br#"{"type":"checkout.session.completed","hacked":true}"#;
        let now = 1_700_000_000;
        let header = format!("t={},v1={}", now, sign(payload, SECRET, now));
        assert!(verifier().verify_at(tampered, &header, now).is_err());
    }

    #[test]
    fn test_rejects_stale_timestamp() {
        let payload = b"{}";
        let signed_at = 1_700_000_000;
        let header = format!("t={},v1={}", signed_at, sign(payload, SECRET, signed_at));
        let result = verifier().verify_at(payload, &header, signed_at + 600);
        assert!(matches!(
            result,
            Err(WebhookError::StaleTimestamp { age_secs: 600 })
        ));
    }

    #[test]
    fn test_accepts_within_tolerance() {
        let payload = b"{}";
        let signed_at = 1_700_000_000;
        let header = format!("t={},v1={}", signed_at, sign(payload, SECRET, signed_at));
        assert!(verifier()
            .verify_at(payload, &header, signed_at + 200)
            .is_ok());
    }

    #[test]
    fn test_accepts_rotated_secret_among_candidates() {
        let payload = b"{}";
        let now = 1_700_000_000;
        let stale = sign(payload, "old_secret", now);
        let fresh = sign(payload, SECRET, now);
        let header = format!("t={},v1={},v1={}", now, stale, fresh);
        assert!(verifier().verify_at(payload, &header, now).is_ok());
    }

    #[test]
    fn test_rejects_missing_timestamp() {
        let result = verifier().verify_at(b"{}", "v1=deadbeef", 0);
        assert!(matches!(
            result,
            Err(WebhookError::MalformedSignatureHeader(_))
        ));
    }

    #[test]
    fn test_rejects_missing_signature() {
        let result = verifier().verify_at(b"{}", "t=1700000000", 1_700_000_000);
        assert!(matches!(
            result,
            Err(WebhookError::MalformedSignatureHeader(_))
        ));
    }

    #[test]
    fn test_rejects_garbage_header() {
        assert!(verifier().verify_at(b"{}", "garbage", 0).is_err());
        assert!(verifier().verify_at(b"{}", "", 0).is_err());
    }

    #[test]
    fn test_custom_tolerance() {
        let payload = b"{}";
        let signed_at = 1_700_000_000;
        let header = format!("t={},v1={}", signed_at, sign(payload, SECRET, signed_at));
        let strict = WebhookVerifier::new(SECRET).with_tolerance(60);
        assert!(strict.verify_at(payload, &header, signed_at + 90).is_err());
    }
}
