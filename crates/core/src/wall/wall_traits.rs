use super::wall_model::{FoundersWallEntry, WallUpsert};
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for founders wall repository operations.
#[async_trait]
pub trait WallRepositoryTrait: Send + Sync {
    fn find_by_backer(&self, backer_id: &str) -> Result<Option<FoundersWallEntry>>;
    /// Active entries ordered by total contributed (desc), then display
    /// order.
    fn list_active(&self) -> Result<Vec<FoundersWallEntry>>;
    /// Insert-or-update keyed by backer_id.
    async fn upsert(&self, upsert: WallUpsert) -> Result<FoundersWallEntry>;
}

/// Trait defining the contract for founders wall derivation.
#[async_trait]
pub trait WallServiceTrait: Send + Sync {
    /// Recomputes the backer's wall entry from their completed public
    /// contributions. Idempotent; safe to call on completion, refund, and
    /// from the reconciliation sweep. Returns the entry now on record, or
    /// `None` when the backer has nothing to show and no existing entry.
    async fn refresh_for_backer(&self, backer_id: &str) -> Result<Option<FoundersWallEntry>>;
    fn list_active(&self) -> Result<Vec<FoundersWallEntry>>;
}
