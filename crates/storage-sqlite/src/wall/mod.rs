mod model;
mod repository;

pub use model::{FoundersWallEntryDB, WallUpsertDB};
pub use repository::WallRepository;
