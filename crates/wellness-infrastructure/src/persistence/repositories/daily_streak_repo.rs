use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::persistence::containers::{DAILY_STREAK_TYPE, STREAKS};
use crate::persistence::{timestamp, DocumentRepositoryBase};
use wellness_domain::shared::{DateKey, DocumentStore, DomainError, UserId};
use wellness_domain::streak::{DailyStreak, DailyStreakRepository};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreakDocument {
    id: String,
    #[serde(rename = "type", default)]
    doc_type: Option<String>,
    user_id: String,
    #[serde(default)]
    user_name: String,
    current_streak: u32,
    /// Older documents predate this field.
    #[serde(default)]
    longest_streak: u32,
    #[serde(default)]
    last_awarded_date: Option<DateKey>,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    updated_at: DateTime<Utc>,
}

impl StreakDocument {
    fn from_streak(streak: &DailyStreak) -> Self {
        Self {
            id: streak.id().to_string(),
            doc_type: Some(DAILY_STREAK_TYPE.to_string()),
            user_id: streak.user_id().as_str().to_string(),
            user_name: streak.user_name().to_string(),
            current_streak: streak.current_streak(),
            longest_streak: streak.longest_streak(),
            last_awarded_date: streak.last_awarded_date(),
            created_at: streak.created_at(),
            updated_at: streak.updated_at(),
        }
    }

    fn into_streak(self) -> DailyStreak {
        DailyStreak::restore(
            self.id,
            UserId::from_string(&self.user_id),
            self.user_name,
            self.current_streak,
            self.longest_streak,
            self.last_awarded_date,
            self.created_at,
            self.updated_at,
        )
    }
}

pub struct DocumentDailyStreakRepository {
    base: DocumentRepositoryBase,
}

impl DocumentDailyStreakRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            base: DocumentRepositoryBase::new(store, STREAKS),
        }
    }
}

#[async_trait]
impl DailyStreakRepository for DocumentDailyStreakRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<DailyStreak>, DomainError> {
        let doc: Option<StreakDocument> = self
            .base
            .find(user_id.as_str(), user_id.as_str(), "Find daily streak")
            .await?;
        Ok(doc.map(StreakDocument::into_streak))
    }

    async fn upsert(&self, streak: &DailyStreak) -> Result<DailyStreak, DomainError> {
        let doc = StreakDocument::from_streak(streak);
        self.base
            .upsert(streak.id(), streak.user_id().as_str(), &doc, "Save daily streak")
            .await?;
        Ok(streak.clone())
    }
}
