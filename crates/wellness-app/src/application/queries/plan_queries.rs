use std::sync::Arc;

use crate::application::dtos::PlanDto;
use crate::application::services::PlanService;
use wellness_domain::shared::DomainError;
use wellness_domain::user::UserIdentityResolver;

pub struct PlanQueryService {
    resolver: Arc<dyn UserIdentityResolver>,
    plan_service: Arc<PlanService>,
}

impl PlanQueryService {
    pub fn new(resolver: Arc<dyn UserIdentityResolver>, plan_service: Arc<PlanService>) -> Self {
        Self {
            resolver,
            plan_service,
        }
    }

    /// Newest stored plan, hydrated with the ledger
    pub async fn get_latest_plan(&self, user_name: &str) -> Result<Option<PlanDto>, DomainError> {
        let user = self.resolver.resolve(user_name).await?;
        let latest = self.plan_service.get_latest_plan(&user).await?;
        Ok(latest.map(PlanDto::from))
    }
}
