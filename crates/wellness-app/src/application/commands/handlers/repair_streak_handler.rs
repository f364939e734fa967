use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::streak_commands::RepairStreakCommand;
use crate::application::dtos::{ActivityStreakDto, DailyStreakDto, RepairStreakResult};
use crate::application::services::{CompletionCounterService, StreakRepairService};
use wellness_domain::shared::{DateKey, DomainError};
use wellness_domain::user::UserIdentityResolver;

pub struct RepairStreakCommandHandler {
    resolver: Arc<dyn UserIdentityResolver>,
    repair_service: Arc<StreakRepairService>,
    counter_service: Arc<CompletionCounterService>,
}

impl RepairStreakCommandHandler {
    pub fn new(
        resolver: Arc<dyn UserIdentityResolver>,
        repair_service: Arc<StreakRepairService>,
        counter_service: Arc<CompletionCounterService>,
    ) -> Self {
        Self {
            resolver,
            repair_service,
            counter_service,
        }
    }
}

#[async_trait]
impl CommandHandler<RepairStreakCommand> for RepairStreakCommandHandler {
    type Result = RepairStreakResult;

    async fn handle(&self, cmd: RepairStreakCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling RepairStreakCommand for user '{}': {}",
            cmd.user_name, cmd.date
        );

        let date = DateKey::parse(&cmd.date)?;
        let user = self.resolver.resolve(&cmd.user_name).await?;

        let streak = self.repair_service.repair(&user, date).await?;
        let counter = self.counter_service.get_for_user(&user).await?;

        Ok(RepairStreakResult {
            streak: DailyStreakDto::from(&streak),
            activity_streak: ActivityStreakDto::from(&counter),
        })
    }
}
