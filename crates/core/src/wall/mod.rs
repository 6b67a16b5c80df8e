//! Founders wall module - public recognition per backer.

mod wall_model;
mod wall_service;
mod wall_traits;


pub use wall_model::{FoundersWallEntry, WallUpsert};
pub use wall_service::WallService;
pub use wall_traits::{WallRepositoryTrait, WallServiceTrait};
