use chrono::Utc;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::sponsors_model::{CourtSponsor, NewCourtSponsor};
use super::sponsors_traits::{SponsorRepositoryTrait, SponsorServiceTrait};
use crate::backers::BackerRepositoryTrait;
use crate::constants::{DEFAULT_SPONSOR_THRESHOLD, SPONSOR_TYPE_INDIVIDUAL};
use crate::contributions::Contribution;
use crate::Result;

/// The court sponsor engine.
///
/// Grants a sponsorship when a completed contribution's amount reaches the
/// threshold, once per contribution regardless of webhook redelivery.
pub struct SponsorService {
    repository: Arc<dyn SponsorRepositoryTrait>,
    backer_repository: Arc<dyn BackerRepositoryTrait>,
    threshold: Decimal,
}

impl SponsorService {
    pub fn new(
        repository: Arc<dyn SponsorRepositoryTrait>,
        backer_repository: Arc<dyn BackerRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            backer_repository,
            threshold: Decimal::from(DEFAULT_SPONSOR_THRESHOLD),
        }
    }

    pub fn with_threshold(mut self, threshold: Decimal) -> Self {
        self.threshold = threshold;
        self
    }
}

#[async_trait::async_trait]
impl SponsorServiceTrait for SponsorService {
    async fn grant_for_contribution(
        &self,
        contribution: &Contribution,
    ) -> Result<Option<CourtSponsor>> {
        if contribution.amount < self.threshold {
            return Ok(None);
        }

        if let Some(existing) = self.repository.find_by_contribution(&contribution.id)? {
            debug!(
                "Sponsor already recorded for contribution {}",
                contribution.id
            );
            return Ok(Some(existing));
        }

        let backer = self.backer_repository.get_by_id(&contribution.backer_id)?;
        let new_sponsor = NewCourtSponsor {
            backer_id: backer.id.clone(),
            contribution_id: contribution.id.clone(),
            sponsor_name: backer.display_name(),
            sponsor_type: SPONSOR_TYPE_INDIVIDUAL.to_string(),
            sponsorship_start: Utc::now().date_naive(),
        };

        match self.repository.insert(new_sponsor).await {
            Ok(sponsor) => {
                info!(
                    "Created court sponsor '{}' for contribution {}",
                    sponsor.sponsor_name, contribution.id
                );
                Ok(Some(sponsor))
            }
            // A concurrent delivery created the row between the check and
            // the insert.
            Err(err) if err.is_unique_violation() => {
                self.repository.find_by_contribution(&contribution.id)
            }
            Err(err) => Err(err),
        }
    }

    async fn revoke_for_contribution(&self, contribution_id: &str) -> Result<usize> {
        self.repository
            .deactivate_for_contribution(contribution_id)
            .await
    }

    fn list_active(&self) -> Result<Vec<CourtSponsor>> {
        self.repository.list_active()
    }
}
