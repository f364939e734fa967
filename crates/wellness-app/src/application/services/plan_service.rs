use chrono::{DateTime, Utc};
use log::{info, warn};
use serde_json::Value;
use std::sync::Arc;

use wellness_domain::dass::{Dass21Scores, DassScoreRecord, DassScoreRepository};
use wellness_domain::plan::{ActivityPlanRecord, ActivityPlanRepository, PlanGenerator};
use wellness_domain::shared::{clock, DomainError, PlanId, UserRef};

use super::PlanHydrationService;

/// A stored plan as handed back to callers: hydrated with ledger state.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub id: PlanId,
    pub plan: Value,
    pub scores: Dass21Scores,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

pub struct PlanService {
    generator: Option<Arc<dyn PlanGenerator>>,
    plan_repo: Arc<dyn ActivityPlanRepository>,
    score_repo: Arc<dyn DassScoreRepository>,
    hydration: Arc<PlanHydrationService>,
}

impl PlanService {
    /// `generator` is `None` when no plan generator is configured; reads of
    /// stored plans still work.
    pub fn new(
        generator: Option<Arc<dyn PlanGenerator>>,
        plan_repo: Arc<dyn ActivityPlanRepository>,
        score_repo: Arc<dyn DassScoreRepository>,
        hydration: Arc<PlanHydrationService>,
    ) -> Self {
        Self {
            generator,
            plan_repo,
            score_repo,
            hydration,
        }
    }

    pub async fn generate(
        &self,
        user: &UserRef,
        scores: Dass21Scores,
    ) -> Result<GeneratedPlan, DomainError> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            DomainError::Validation(
                "Plan generation is not configured; set OPENAI_API_KEY".to_string(),
            )
        })?;

        // 1. Generate
        let raw = generator.generate(&scores).await?;
        let now = clock::now();

        // 2. Score snapshot, best effort
        let snapshot = DassScoreRecord::new(user, scores, now);
        if let Err(e) = self.score_repo.create(&snapshot).await {
            warn!(
                "[plan] failed to store score snapshot for user {}: {}",
                user.id, e
            );
        }

        // 3. Store plan
        let record = ActivityPlanRecord::new(user, raw, scores, now);
        self.plan_repo.create(&record).await?;
        info!(
            "[plan] stored plan {} for user {} (verified={})",
            record.id(),
            user.id,
            record.is_verified()
        );

        self.to_generated(record).await
    }

    pub async fn get_latest_plan(&self, user: &UserRef) -> Result<Option<GeneratedPlan>, DomainError> {
        match self.plan_repo.find_latest_by_user_id(&user.id).await? {
            Some(record) => Ok(Some(self.to_generated(record).await?)),
            None => Ok(None),
        }
    }

    async fn to_generated(&self, record: ActivityPlanRecord) -> Result<GeneratedPlan, DomainError> {
        let plan = self.hydration.hydrate(record.user_id(), record.plan()).await?;
        Ok(GeneratedPlan {
            id: record.id().clone(),
            plan,
            scores: *record.scores(),
            verified: record.is_verified(),
            created_at: record.created_at(),
        })
    }
}
