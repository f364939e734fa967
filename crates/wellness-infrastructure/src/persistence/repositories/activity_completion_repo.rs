use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::persistence::containers::{
    ACTIVITY_COMPLETIONS, ACTIVITY_COMPLETION_TYPE, ACTIVITY_PLAN_TYPE,
};
use crate::persistence::{timestamp, DocumentRepositoryBase};
use wellness_domain::activity::{ActivityCompletion, ActivityCompletionRepository, ActivitySlot};
use wellness_domain::shared::{
    DateKey, DocumentQuery, DocumentStore, DomainError, SortOrder, UserId,
};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionDocument {
    id: String,
    #[serde(rename = "type", default)]
    doc_type: Option<String>,
    user_id: String,
    #[serde(default)]
    user_name: String,
    date: DateKey,
    slot: ActivitySlot,
    completed: bool,
    #[serde(with = "timestamp")]
    completed_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    updated_at: DateTime<Utc>,
}

impl CompletionDocument {
    fn from_record(record: &ActivityCompletion) -> Self {
        Self {
            id: record.id().to_string(),
            doc_type: Some(ACTIVITY_COMPLETION_TYPE.to_string()),
            user_id: record.user_id().as_str().to_string(),
            user_name: record.user_name().to_string(),
            date: record.date(),
            slot: record.slot(),
            completed: record.is_completed(),
            completed_at: record.completed_at(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    fn into_record(self) -> ActivityCompletion {
        ActivityCompletion::restore(
            self.id,
            UserId::from_string(&self.user_id),
            self.user_name,
            self.date,
            self.slot,
            self.completed,
            self.completed_at,
            self.created_at,
            self.updated_at,
        )
    }
}

pub struct DocumentActivityCompletionRepository {
    base: DocumentRepositoryBase,
}

impl DocumentActivityCompletionRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            base: DocumentRepositoryBase::new(store, ACTIVITY_COMPLETIONS),
        }
    }

    async fn query_records(
        &self,
        query: DocumentQuery,
        context: &str,
    ) -> Result<Vec<ActivityCompletion>, DomainError> {
        let docs: Vec<CompletionDocument> = self
            .base
            .query(&query.not_eq("type", ACTIVITY_PLAN_TYPE), context)
            .await?;
        Ok(docs.into_iter().map(CompletionDocument::into_record).collect())
    }
}

#[async_trait]
impl ActivityCompletionRepository for DocumentActivityCompletionRepository {
    async fn find(
        &self,
        user_id: &UserId,
        date: &DateKey,
        slot: ActivitySlot,
    ) -> Result<Option<ActivityCompletion>, DomainError> {
        let id = ActivityCompletion::make_id(user_id, date, slot);
        let doc: Option<CompletionDocument> = self
            .base
            .find(&id, user_id.as_str(), "Find activity completion")
            .await?;
        Ok(doc.map(CompletionDocument::into_record))
    }

    async fn upsert(&self, record: &ActivityCompletion) -> Result<ActivityCompletion, DomainError> {
        let doc = CompletionDocument::from_record(record);
        self.base
            .upsert(record.id(), record.user_id().as_str(), &doc, "Save activity completion")
            .await?;
        Ok(record.clone())
    }

    async fn find_by_day(
        &self,
        user_id: &UserId,
        date: &DateKey,
    ) -> Result<Vec<ActivityCompletion>, DomainError> {
        let query = DocumentQuery::in_partition(user_id.as_str()).eq("date", date.to_string());
        self.query_records(query, "Find activity completions by day").await
    }

    async fn find_in_range(
        &self,
        user_id: &UserId,
        start: &DateKey,
        end: &DateKey,
    ) -> Result<Vec<ActivityCompletion>, DomainError> {
        let query = DocumentQuery::in_partition(user_id.as_str())
            .between("date", &start.to_string(), &end.to_string())
            .order_by("date", SortOrder::Asc);
        self.query_records(query, "Find activity completions in range").await
    }
}
