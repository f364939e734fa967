use async_trait::async_trait;

use super::CompletionCounter;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait CompletionCounterRepository: Send + Sync {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CompletionCounter>, DomainError>;

    /// Save (replace, or create when absent) the user's counter.
    async fn upsert(&self, counter: &CompletionCounter) -> Result<CompletionCounter, DomainError>;
}
