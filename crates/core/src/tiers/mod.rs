//! Contribution tiers module - catalog models and traits.
//!
//! Tiers are catalog entries; the webhook flow only ever reads them.

mod tiers_model;
mod tiers_traits;

#[cfg(test)]
mod tiers_model_tests;

pub use tiers_model::{BenefitDescriptor, NewTier, Tier, TierAvailability};
pub use tiers_traits::TierRepositoryTrait;
