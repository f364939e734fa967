use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::persistence::containers::DASS_SCORES;
use crate::persistence::{timestamp, DocumentRepositoryBase};
use wellness_domain::dass::{Dass21Scores, DassScoreRecord, DassScoreRepository};
use wellness_domain::shared::{DocumentStore, DomainError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreDocument<'a> {
    id: &'a str,
    user_id: &'a str,
    user_name: &'a str,
    #[serde(flatten)]
    scores: Dass21Scores,
    total: u32,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
}

/// Write-only snapshot log of submitted scores.
pub struct DocumentDassScoreRepository {
    base: DocumentRepositoryBase,
}

impl DocumentDassScoreRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            base: DocumentRepositoryBase::new(store, DASS_SCORES),
        }
    }
}

#[async_trait]
impl DassScoreRepository for DocumentDassScoreRepository {
    async fn create(&self, record: &DassScoreRecord) -> Result<(), DomainError> {
        let doc = ScoreDocument {
            id: record.id().as_str(),
            user_id: record.user_id().as_str(),
            user_name: record.user_name(),
            scores: *record.scores(),
            total: record.total(),
            created_at: record.created_at(),
        };
        self.base.create(&doc, "Create DASS-21 score snapshot").await
    }
}
