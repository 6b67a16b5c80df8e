use thiserror::Error;

/// Errors raised while receiving a provider webhook.
///
/// Everything here maps to a client error (400) at the HTTP boundary: a bad
/// signature or shape indicates tampering or misconfiguration, not a
/// transient failure worth retrying.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("missing signature header")]
    MissingSignatureHeader,

    #[error("malformed signature header: {0}")]
    MalformedSignatureHeader(String),

    #[error("signature timestamp outside tolerance ({age_secs}s old)")]
    StaleTimestamp { age_secs: i64 },

    #[error("signature verification failed")]
    SignatureMismatch,

    #[error("malformed event payload: {0}")]
    MalformedEvent(String),
}
