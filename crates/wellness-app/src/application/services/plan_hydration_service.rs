use log::debug;
use serde_json::Value;
use std::sync::Arc;

use wellness_domain::plan::ActivityPlan;
use wellness_domain::shared::{DomainError, UserId};

use super::ActivityLedgerService;

/// Overlays ledger truth onto a stored plan's `completed` flags.
pub struct PlanHydrationService {
    ledger: Arc<ActivityLedgerService>,
}

impl PlanHydrationService {
    pub fn new(ledger: Arc<ActivityLedgerService>) -> Self {
        Self { ledger }
    }

    /// Hydrate a raw plan. Anything without a recognizable day list comes
    /// back unchanged; a recognized plan comes back with canonical keys.
    pub async fn hydrate(&self, user_id: &UserId, raw: &Value) -> Result<Value, DomainError> {
        let Some(mut plan) = ActivityPlan::normalize(raw) else {
            debug!("[hydrate] plan for user {} has no day list, passing through", user_id);
            return Ok(raw.clone());
        };

        self.hydrate_plan(user_id, &mut plan).await?;
        plan.to_value()
    }

    pub async fn hydrate_plan(
        &self,
        user_id: &UserId,
        plan: &mut ActivityPlan,
    ) -> Result<(), DomainError> {
        let Some((start, end)) = plan.date_range() else {
            return Ok(());
        };

        let completed = self.ledger.completed_slots(user_id, start, end).await?;
        debug!(
            "[hydrate] user {}: {} completed slot(s) in {}..{}",
            user_id,
            completed.len(),
            start,
            end
        );
        plan.apply_completions(&completed);
        Ok(())
    }
}
