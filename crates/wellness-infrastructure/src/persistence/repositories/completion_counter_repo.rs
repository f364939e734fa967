use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::persistence::containers::{COMPLETION_STREAK_TYPE, STREAKS};
use crate::persistence::{timestamp, DocumentRepositoryBase};
use wellness_domain::completion_counter::{CompletionCounter, CompletionCounterRepository};
use wellness_domain::shared::{DocumentStore, DomainError, UserId};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CounterDocument {
    id: String,
    #[serde(rename = "type")]
    doc_type: String,
    user_id: String,
    #[serde(default)]
    user_name: String,
    total_completions: u64,
    #[serde(with = "timestamp")]
    last_increment_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    updated_at: DateTime<Utc>,
}

impl CounterDocument {
    fn from_counter(counter: &CompletionCounter) -> Self {
        Self {
            id: counter.id().to_string(),
            doc_type: COMPLETION_STREAK_TYPE.to_string(),
            user_id: counter.user_id().as_str().to_string(),
            user_name: counter.user_name().to_string(),
            total_completions: counter.total_completions(),
            last_increment_at: counter.last_increment_at(),
            created_at: counter.created_at(),
            updated_at: counter.updated_at(),
        }
    }

    fn into_counter(self) -> CompletionCounter {
        CompletionCounter::restore(
            self.id,
            UserId::from_string(&self.user_id),
            self.user_name,
            self.total_completions,
            self.last_increment_at,
            self.created_at,
            self.updated_at,
        )
    }
}

/// Counters share the `streaks` container with daily streak documents and are
/// told apart by id suffix and `type`.
pub struct DocumentCompletionCounterRepository {
    base: DocumentRepositoryBase,
}

impl DocumentCompletionCounterRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            base: DocumentRepositoryBase::new(store, STREAKS),
        }
    }
}

#[async_trait]
impl CompletionCounterRepository for DocumentCompletionCounterRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CompletionCounter>, DomainError> {
        let id = CompletionCounter::make_id(user_id);
        let doc: Option<CounterDocument> = self
            .base
            .find(&id, user_id.as_str(), "Find completion counter")
            .await?;
        Ok(doc.map(CounterDocument::into_counter))
    }

    async fn upsert(&self, counter: &CompletionCounter) -> Result<CompletionCounter, DomainError> {
        let doc = CounterDocument::from_counter(counter);
        self.base
            .upsert(counter.id(), counter.user_id().as_str(), &doc, "Save completion counter")
            .await?;
        Ok(counter.clone())
    }
}
