use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::persistence::containers::{ACTIVITY_COMPLETIONS, ACTIVITY_PLAN_TYPE};
use crate::persistence::{timestamp, DocumentRepositoryBase};
use wellness_domain::dass::Dass21Scores;
use wellness_domain::plan::{ActivityPlanRecord, ActivityPlanRepository};
use wellness_domain::shared::{DocumentQuery, DocumentStore, DomainError, PlanId, SortOrder, UserId};

/// The plan body is stored as-is; it is only normalized when read back
/// through hydration.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanDocument {
    id: String,
    #[serde(rename = "type")]
    doc_type: String,
    user_id: String,
    #[serde(default)]
    user_name: String,
    plan: Value,
    #[serde(default)]
    scores: Dass21Scores,
    verified: bool,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
}

impl PlanDocument {
    fn from_record(record: &ActivityPlanRecord) -> Self {
        Self {
            id: record.id().as_str().to_string(),
            doc_type: ACTIVITY_PLAN_TYPE.to_string(),
            user_id: record.user_id().as_str().to_string(),
            user_name: record.user_name().to_string(),
            plan: record.plan().clone(),
            scores: *record.scores(),
            verified: record.is_verified(),
            created_at: record.created_at(),
        }
    }

    fn into_record(self) -> ActivityPlanRecord {
        ActivityPlanRecord::restore(
            PlanId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            self.user_name,
            self.plan,
            self.scores,
            self.verified,
            self.created_at,
        )
    }
}

pub struct DocumentActivityPlanRepository {
    base: DocumentRepositoryBase,
}

impl DocumentActivityPlanRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            base: DocumentRepositoryBase::new(store, ACTIVITY_COMPLETIONS),
        }
    }
}

#[async_trait]
impl ActivityPlanRepository for DocumentActivityPlanRepository {
    async fn create(&self, record: &ActivityPlanRecord) -> Result<(), DomainError> {
        self.base
            .create(&PlanDocument::from_record(record), "Create activity plan")
            .await
    }

    async fn find_latest_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ActivityPlanRecord>, DomainError> {
        let query = DocumentQuery::in_partition(user_id.as_str())
            .eq("type", ACTIVITY_PLAN_TYPE)
            .order_by("createdAt", SortOrder::Desc)
            .limit(1);

        let docs: Vec<PlanDocument> = self.base.query(&query, "Find latest activity plan").await?;
        Ok(docs.into_iter().next().map(PlanDocument::into_record))
    }
}
