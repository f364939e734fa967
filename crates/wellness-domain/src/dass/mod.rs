use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, ScoreId, UserId, UserRef};

/// Highest valid DASS-21 subscale score.
pub const MAX_SUBSCALE_SCORE: u8 = 21;

/// DASS-21 subscale scores. Any of them may be missing; a plan built from an
/// incomplete set is labelled unverified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dass21Scores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depression: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anxiety: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<u8>,
}

impl Dass21Scores {
    pub fn new(
        depression: Option<u8>,
        anxiety: Option<u8>,
        stress: Option<u8>,
    ) -> Result<Self, DomainError> {
        for (label, value) in [
            ("depression", depression),
            ("anxiety", anxiety),
            ("stress", stress),
        ] {
            if let Some(v) = value {
                if v > MAX_SUBSCALE_SCORE {
                    return Err(DomainError::Validation(format!(
                        "{} score must be between 0 and {}",
                        label, MAX_SUBSCALE_SCORE
                    )));
                }
            }
        }

        Ok(Self {
            depression,
            anxiety,
            stress,
        })
    }

    /// All three subscales present.
    pub fn is_verified(&self) -> bool {
        self.depression.is_some() && self.anxiety.is_some() && self.stress.is_some()
    }

    /// Sum of the subscales that are present.
    pub fn total(&self) -> u32 {
        [self.depression, self.anxiety, self.stress]
            .iter()
            .flatten()
            .map(|v| u32::from(*v))
            .sum()
    }

    /// Human-readable names of missing subscales.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.depression.is_none() {
            missing.push("Depression score");
        }
        if self.anxiety.is_none() {
            missing.push("Anxiety score");
        }
        if self.stress.is_none() {
            missing.push("Stress score");
        }
        missing
    }
}

/// Snapshot of the scores a plan was generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DassScoreRecord {
    id: ScoreId,
    user_id: UserId,
    user_name: String,
    scores: Dass21Scores,
    total: u32,
    created_at: DateTime<Utc>,
}

impl DassScoreRecord {
    pub fn new(user: &UserRef, scores: Dass21Scores, now: DateTime<Utc>) -> Self {
        Self {
            id: ScoreId::new(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            total: scores.total(),
            scores,
            created_at: now,
        }
    }

    pub fn restore(
        id: ScoreId,
        user_id: UserId,
        user_name: String,
        scores: Dass21Scores,
        total: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            user_name,
            scores,
            total,
            created_at,
        }
    }

    pub fn id(&self) -> &ScoreId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn scores(&self) -> &Dass21Scores {
        &self.scores
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[async_trait]
pub trait DassScoreRepository: Send + Sync {
    async fn create(&self, record: &DassScoreRecord) -> Result<(), DomainError>;
}
