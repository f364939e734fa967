use async_trait::async_trait;

use super::{ActivityCompletion, ActivitySlot};
use crate::shared::{DateKey, DomainError, UserId};

#[async_trait]
pub trait ActivityCompletionRepository: Send + Sync {
    /// Find the ledger entry for one (user, date, slot).
    async fn find(
        &self,
        user_id: &UserId,
        date: &DateKey,
        slot: ActivitySlot,
    ) -> Result<Option<ActivityCompletion>, DomainError>;

    /// Save (replace, or create when absent) a ledger entry.
    async fn upsert(&self, record: &ActivityCompletion) -> Result<ActivityCompletion, DomainError>;

    /// All entries for one user on one date.
    async fn find_by_day(
        &self,
        user_id: &UserId,
        date: &DateKey,
    ) -> Result<Vec<ActivityCompletion>, DomainError>;

    /// All entries for one user with `start <= date <= end`.
    async fn find_in_range(
        &self,
        user_id: &UserId,
        start: &DateKey,
        end: &DateKey,
    ) -> Result<Vec<ActivityCompletion>, DomainError>;
}
