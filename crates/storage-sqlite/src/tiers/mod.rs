mod model;
mod repository;

pub use model::{NewTierDB, TierDB};
pub use repository::TierRepository;
