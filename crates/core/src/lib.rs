//! CourtFund Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for the CourtFund crowdfunding
//! backend. It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod backers;
pub mod benefits;
pub mod campaigns;
pub mod constants;
pub mod contributions;
pub mod errors;
pub mod reconciliation;
pub mod sponsors;
pub mod tiers;
pub mod wall;
pub mod webhooks;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
