use async_trait::async_trait;

use super::DailyStreak;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait DailyStreakRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<DailyStreak>, DomainError>;

    /// Save (replace, or create when absent) the user's streak record.
    async fn upsert(&self, streak: &DailyStreak) -> Result<DailyStreak, DomainError>;
}
