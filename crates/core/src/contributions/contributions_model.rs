//! Contribution domain models and the status transition rules.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_CUSTOM_MESSAGE_LEN;
use crate::errors::{Result, ValidationError};

/// Lifecycle state of a contribution.
///
/// Valid transitions: pending -> completed -> refunded, pending -> failed,
/// and failed -> completed (a later success event recovers a failed
/// payment). Refunded is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl ContributionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionStatus::Pending => "pending",
            ContributionStatus::Completed => "completed",
            ContributionStatus::Failed => "failed",
            ContributionStatus::Refunded => "refunded",
        }
    }

    /// Whether moving to `next` respects the transition rules.
    pub fn can_transition_to(self, next: ContributionStatus) -> bool {
        use ContributionStatus::*;
        matches!(
            (self, next),
            (Pending, Completed) | (Pending, Failed) | (Failed, Completed) | (Completed, Refunded)
        )
    }

    /// Refunded rows never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, ContributionStatus::Refunded)
    }
}

impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributionStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(ContributionStatus::Pending),
            "completed" => Ok(ContributionStatus::Completed),
            "failed" => Ok(ContributionStatus::Failed),
            "refunded" => Ok(ContributionStatus::Refunded),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown contribution status '{}'",
                other
            ))
            .into()),
        }
    }
}

/// Domain model representing one pledge/payment attempt.
///
/// Rows are never deleted; every lifecycle change is a status mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    pub backer_id: String,
    pub campaign_id: String,
    pub tier_id: Option<String>,
    pub amount: Decimal,
    pub status: ContributionStatus,
    pub stripe_payment_intent_id: Option<String>,
    pub stripe_charge_id: Option<String>,
    pub stripe_checkout_session_id: Option<String>,
    pub payment_method: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
    pub refunded_at: Option<NaiveDateTime>,
    pub is_public: bool,
    pub show_amount: bool,
    pub custom_message: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a pending contribution at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub backer_id: String,
    pub campaign_id: String,
    pub tier_id: Option<String>,
    pub amount: Decimal,
    pub stripe_checkout_session_id: Option<String>,
    pub is_public: bool,
    pub show_amount: bool,
    pub custom_message: Option<String>,
}

impl NewContribution {
    /// Validates the contribution intake payload.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(
                ValidationError::InvalidInput("contribution amount must be positive".into()).into(),
            );
        }
        if self
            .custom_message
            .as_deref()
            .is_some_and(|m| m.chars().count() > MAX_CUSTOM_MESSAGE_LEN)
        {
            return Err(ValidationError::InvalidInput(format!(
                "custom message must be at most {} characters",
                MAX_CUSTOM_MESSAGE_LEN
            ))
            .into());
        }
        Ok(())
    }
}

/// Provider identifiers recorded alongside a completed transition.
#[derive(Debug, Clone, Default)]
pub struct CompletionUpdate {
    pub payment_intent_id: Option<String>,
    pub charge_id: Option<String>,
    pub payment_method: Option<String>,
}
