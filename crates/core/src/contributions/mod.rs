//! Contributions module - domain models, services, and traits.
//!
//! A contribution is one pledge/payment attempt. Its status is driven
//! exclusively by payment-provider webhook events after creation.

mod contributions_model;
mod contributions_service;
mod contributions_traits;



pub use contributions_model::{
    CompletionUpdate, Contribution, ContributionStatus, NewContribution,
};
pub use contributions_service::ContributionService;
pub use contributions_traits::{ContributionRepositoryTrait, ContributionServiceTrait};
