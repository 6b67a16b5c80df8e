mod model;
mod repository;

pub use model::{CourtSponsorDB, NewCourtSponsorDB};
pub use repository::SponsorRepository;
