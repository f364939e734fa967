use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dass::Dass21Scores;
use crate::shared::{PlanId, UserId, UserRef};

/// A stored plan as the generator produced it. The plan body is kept raw;
/// completion state is never persisted here and is overlaid on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPlanRecord {
    id: PlanId,
    user_id: UserId,
    user_name: String,
    plan: Value,
    scores: Dass21Scores,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl ActivityPlanRecord {
    pub fn new(user: &UserRef, plan: Value, scores: Dass21Scores, now: DateTime<Utc>) -> Self {
        Self {
            id: PlanId::new(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            plan,
            verified: scores.is_verified(),
            scores,
            created_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: PlanId,
        user_id: UserId,
        user_name: String,
        plan: Value,
        scores: Dass21Scores,
        verified: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            user_name,
            plan,
            scores,
            verified,
            created_at,
        }
    }

    pub fn id(&self) -> &PlanId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn plan(&self) -> &Value {
        &self.plan
    }

    pub fn scores(&self) -> &Dass21Scores {
        &self.scores
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
