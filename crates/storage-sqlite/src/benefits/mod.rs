mod model;
mod repository;

pub use model::{BenefitAllocationDB, NewBenefitAllocationDB};
pub use repository::BenefitRepository;
