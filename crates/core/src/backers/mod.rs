//! Backers module - domain models, services, and traits.

mod backers_model;
mod backers_service;
mod backers_traits;

#[cfg(test)]
mod backers_model_tests;

pub use backers_model::{Backer, NewBacker};
pub use backers_service::BackerService;
pub use backers_traits::{BackerRepositoryTrait, BackerServiceTrait};
