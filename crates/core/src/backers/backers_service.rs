use log::debug;
use std::sync::Arc;

use super::backers_model::{Backer, NewBacker};
use super::backers_traits::{BackerRepositoryTrait, BackerServiceTrait};
use crate::Result;

/// Service for managing backer identities.
pub struct BackerService {
    repository: Arc<dyn BackerRepositoryTrait>,
}

impl BackerService {
    pub fn new(repository: Arc<dyn BackerRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl BackerServiceTrait for BackerService {
    fn find_by_email(&self, email: &str) -> Result<Option<Backer>> {
        self.repository.find_by_email(&email.trim().to_lowercase())
    }

    async fn get_or_create(&self, mut new_backer: NewBacker) -> Result<Backer> {
        new_backer.validate()?;
        new_backer.email = new_backer.normalized_email();

        if let Some(existing) = self.repository.find_by_email(&new_backer.email)? {
            debug!("Backer already exists for email, reusing {}", existing.id);
            return Ok(existing);
        }

        match self.repository.insert(new_backer.clone()).await {
            Ok(created) => Ok(created),
            // Lost a race with a concurrent first contribution for the same
            // email; the winner's row is the one to use.
            Err(err) if err.is_unique_violation() => {
                debug!("Concurrent backer insert for {}, re-reading", new_backer.email);
                self.repository
                    .find_by_email(&new_backer.email)?
                    .ok_or(err)
            }
            Err(err) => Err(err),
        }
    }
}
