mod model;
mod repository;

pub use model::{CampaignDB, NewCampaignDB};
pub use repository::CampaignRepository;
