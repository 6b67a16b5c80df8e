/// Minimum completed contribution amount (in campaign currency units) that
/// earns a court sponsorship, unless overridden by configuration.
pub const DEFAULT_SPONSOR_THRESHOLD: i64 = 1000;

/// Sponsor type recorded for individual backers.
pub const SPONSOR_TYPE_INDIVIDUAL: &str = "individual";

/// Maximum accepted length of a contribution's custom message.
pub const MAX_CUSTOM_MESSAGE_LEN: usize = 500;
