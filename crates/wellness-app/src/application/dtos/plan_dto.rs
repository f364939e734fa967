use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wellness_domain::dass::Dass21Scores;

use crate::application::services::GeneratedPlan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDto {
    pub id: String,
    pub plan: Value,
    pub scores: Dass21Scores,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<GeneratedPlan> for PlanDto {
    fn from(generated: GeneratedPlan) -> Self {
        Self {
            id: generated.id.as_str().to_string(),
            plan: generated.plan,
            scores: generated.scores,
            verified: generated.verified,
            created_at: generated.created_at,
        }
    }
}
