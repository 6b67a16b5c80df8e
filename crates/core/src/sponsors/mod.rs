//! Court sponsors module - recognition models, the sponsor engine, and
//! traits.

mod sponsors_model;
mod sponsors_service;
mod sponsors_traits;

#[cfg(test)]
mod sponsors_service_tests;

pub use sponsors_model::{CourtSponsor, NewCourtSponsor};
pub use sponsors_service::SponsorService;
pub use sponsors_traits::{SponsorRepositoryTrait, SponsorServiceTrait};
