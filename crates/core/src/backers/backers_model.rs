//! Backer domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a contributor identity.
///
/// A backer is shared across contributions: many contributions may reference
/// the same backer, looked up by email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Backer {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_initial: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Backer {
    /// Public display name, e.g. "Jane D." - the form used on the founders
    /// wall and court sponsor plaques.
    pub fn display_name(&self) -> String {
        format!("{} {}.", self.first_name, self.last_initial)
    }

    /// "City, ST" when both parts are present, otherwise whichever exists.
    pub fn location(&self) -> Option<String> {
        match (self.city.as_deref(), self.state.as_deref()) {
            (Some(city), Some(state)) => Some(format!("{}, {}", city, state)),
            (Some(city), None) => Some(city.to_string()),
            (None, Some(state)) => Some(state.to_string()),
            (None, None) => None,
        }
    }
}

/// Input model for creating a backer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBacker {
    pub email: String,
    pub first_name: String,
    pub last_initial: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl NewBacker {
    /// Validates the backer intake payload.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(ValidationError::InvalidInput(format!(
                "invalid email address: '{}'",
                self.email
            ))
            .into());
        }
        if self.first_name.trim().is_empty() || self.first_name.len() > 100 {
            return Err(
                ValidationError::InvalidInput("first name must be 1-100 characters".into()).into(),
            );
        }
        if self.last_initial.chars().count() != 1 {
            return Err(ValidationError::InvalidInput(
                "last initial must be a single character".into(),
            )
            .into());
        }
        if self.phone.as_deref().is_some_and(|p| p.len() > 30) {
            return Err(
                ValidationError::InvalidInput("phone must be at most 30 characters".into()).into(),
            );
        }
        if self.state.as_deref().is_some_and(|s| s.len() != 2) {
            return Err(
                ValidationError::InvalidInput("state must be a 2-letter code".into()).into(),
            );
        }
        Ok(())
    }

    /// Email normalized for the unique lookup.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}
