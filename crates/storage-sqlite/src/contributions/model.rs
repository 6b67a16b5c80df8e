//! Database models for contributions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use courtfund_core::contributions::{Contribution, ContributionStatus, NewContribution};

use crate::utils::parse_decimal;

/// Database model for contributions
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::contributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ContributionDB {
    pub id: String,
    pub backer_id: String,
    pub campaign_id: String,
    pub tier_id: Option<String>,
    pub amount: String,
    pub status: String,
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

/// Database model for creating a contribution
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contributions)]
#[serde(rename_all = "camelCase")]
pub struct NewContributionDB {
    pub id: String,
    pub backer_id: String,
    pub campaign_id: String,
    pub tier_id: Option<String>,
    pub amount: String,
    pub status: String,
    pub stripe_checkout_session_id: Option<String>,
    pub is_public: bool,
    pub show_amount: bool,
    pub custom_message: Option<String>,
}

// Conversion to domain models
impl From<ContributionDB> for Contribution {
    fn from(db: ContributionDB) -> Self {
        let status = ContributionStatus::from_str(&db.status).unwrap_or_else(|_| {
            log::error!(
                "Unknown status '{}' on contribution {}, treating as pending",
                db.status,
                db.id
            );
            ContributionStatus::Pending
        });
        Self {
            amount: parse_decimal(&db.amount, "contributions.amount"),
            status,
            id: db.id,
            backer_id: db.backer_id,
            campaign_id: db.campaign_id,
            tier_id: db.tier_id,
            stripe_payment_intent_id: db.stripe_payment_intent_id,
            stripe_charge_id: db.stripe_charge_id,
            stripe_checkout_session_id: db.stripe_checkout_session_id,
            payment_method: db.payment_method,
            completed_at: db.completed_at,
            refunded_at: db.refunded_at,
            is_public: db.is_public,
            show_amount: db.show_amount,
            custom_message: db.custom_message,
            created_at: db.created_at,
        }
    }
}

impl NewContributionDB {
    pub fn from_domain(domain: NewContribution, fallback_id: String) -> Self {
        Self {
            id: domain.id.unwrap_or(fallback_id),
            backer_id: domain.backer_id,
            campaign_id: domain.campaign_id,
            tier_id: domain.tier_id,
            amount: domain.amount.to_string(),
            status: ContributionStatus::Pending.as_str().to_string(),
            stripe_checkout_session_id: domain.stripe_checkout_session_id,
            is_public: domain.is_public,
            show_amount: domain.show_amount,
            custom_message: domain.custom_message,
        }
    }
}
