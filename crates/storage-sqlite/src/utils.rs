//! Utility helpers shared by the repository modules.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses an amount column stored as TEXT.
///
/// Amounts are written by this crate from `Decimal::to_string`, so parse
/// failures indicate hand-edited rows; fall back to zero rather than
/// poisoning whole list queries.
pub fn parse_decimal(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e) => {
            log::error!(
                "Failed to parse {} '{}' as Decimal ({}), falling back to zero",
                field_name,
                value_str,
                e
            );
            Decimal::ZERO
        }
    }
}
