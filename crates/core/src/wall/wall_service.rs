use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::wall_model::{FoundersWallEntry, WallUpsert};
use super::wall_traits::{WallRepositoryTrait, WallServiceTrait};
use crate::backers::BackerRepositoryTrait;
use crate::contributions::ContributionRepositoryTrait;
use crate::Result;

/// Derives founders wall entries from contribution state.
pub struct WallService {
    repository: Arc<dyn WallRepositoryTrait>,
    backer_repository: Arc<dyn BackerRepositoryTrait>,
    contribution_repository: Arc<dyn ContributionRepositoryTrait>,
}

impl WallService {
    pub fn new(
        repository: Arc<dyn WallRepositoryTrait>,
        backer_repository: Arc<dyn BackerRepositoryTrait>,
        contribution_repository: Arc<dyn ContributionRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            backer_repository,
            contribution_repository,
        }
    }
}

#[async_trait::async_trait]
impl WallServiceTrait for WallService {
    async fn refresh_for_backer(&self, backer_id: &str) -> Result<Option<FoundersWallEntry>> {
        let total = self
            .contribution_repository
            .sum_completed_public_by_backer(backer_id)?;

        if total <= Decimal::ZERO && self.repository.find_by_backer(backer_id)?.is_none() {
            debug!("Backer {} has no public total and no wall entry", backer_id);
            return Ok(None);
        }

        let backer = self.backer_repository.get_by_id(backer_id)?;
        let entry = self
            .repository
            .upsert(WallUpsert {
                backer_id: backer.id.clone(),
                display_name: backer.display_name(),
                location: backer.location(),
                total_contributed: total,
                // A fully refunded backer keeps the row for history but
                // drops off the public wall.
                is_active: total > Decimal::ZERO,
            })
            .await?;
        Ok(Some(entry))
    }

    fn list_active(&self) -> Result<Vec<FoundersWallEntry>> {
        self.repository.list_active()
    }
}
