use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::plan_commands::GeneratePlanCommand;
use crate::application::dtos::PlanDto;
use crate::application::services::PlanService;
use wellness_domain::shared::DomainError;
use wellness_domain::user::UserIdentityResolver;

pub struct GeneratePlanCommandHandler {
    resolver: Arc<dyn UserIdentityResolver>,
    plan_service: Arc<PlanService>,
}

impl GeneratePlanCommandHandler {
    pub fn new(resolver: Arc<dyn UserIdentityResolver>, plan_service: Arc<PlanService>) -> Self {
        Self {
            resolver,
            plan_service,
        }
    }
}

#[async_trait]
impl CommandHandler<GeneratePlanCommand> for GeneratePlanCommandHandler {
    type Result = PlanDto;

    async fn handle(&self, cmd: GeneratePlanCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling GeneratePlanCommand for user '{}' (verified: {})",
            cmd.user_name,
            cmd.scores.is_verified()
        );

        let user = self.resolver.resolve(&cmd.user_name).await?;
        let generated = self.plan_service.generate(&user, cmd.scores).await?;

        Ok(generated.into())
    }
}
