use async_trait::async_trait;
use serde_json::Value;

use super::ActivityPlanRecord;
use crate::dass::Dass21Scores;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait ActivityPlanRepository: Send + Sync {
    async fn create(&self, record: &ActivityPlanRecord) -> Result<(), DomainError>;

    /// Most recently created plan for the user.
    async fn find_latest_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ActivityPlanRecord>, DomainError>;
}

/// Produces a raw 7-day plan from a set of scores. The result is JSON in
/// whatever shape the generator emits; it is normalized on read.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate(&self, scores: &Dass21Scores) -> Result<Value, DomainError>;
}
