//! Benefits module - allocation models, the allocator service, and traits.

mod benefits_model;
mod benefits_service;
mod benefits_traits;


pub use benefits_model::{BenefitAllocation, NewBenefitAllocation};
pub use benefits_service::BenefitService;
pub use benefits_traits::{BenefitRepositoryTrait, BenefitServiceTrait};
