mod model;
mod repository;

pub use model::{BackerDB, NewBackerDB};
pub use repository::BackerRepository;
