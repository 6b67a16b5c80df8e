use super::backers_model::{Backer, NewBacker};
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for Backer repository operations.
#[async_trait]
pub trait BackerRepositoryTrait: Send + Sync {
    fn get_by_id(&self, backer_id: &str) -> Result<Backer>;
    fn find_by_email(&self, email: &str) -> Result<Option<Backer>>;
    async fn insert(&self, new_backer: NewBacker) -> Result<Backer>;
}

/// Trait defining the contract for Backer service operations.
#[async_trait]
pub trait BackerServiceTrait: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<Backer>>;
    /// Looks the backer up by email and creates one when absent.
    ///
    /// Idempotent: repeated calls with the same email return the same row.
    async fn get_or_create(&self, new_backer: NewBacker) -> Result<Backer>;
}
