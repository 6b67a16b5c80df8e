//! Campaigns module - catalog models, services, and traits.

mod campaigns_model;
mod campaigns_service;
mod campaigns_traits;

pub use campaigns_model::{Campaign, CampaignDetail, CampaignWithProgress, NewCampaign};
pub use campaigns_service::CampaignService;
pub use campaigns_traits::{CampaignRepositoryTrait, CampaignServiceTrait};
