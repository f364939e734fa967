use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::streak_commands::AwardFlameCommand;
use crate::application::dtos::StreakAwardDto;
use crate::application::services::DailyStreakService;
use wellness_domain::shared::{DateKey, DomainError};
use wellness_domain::user::UserIdentityResolver;

pub struct AwardFlameCommandHandler {
    resolver: Arc<dyn UserIdentityResolver>,
    streak_service: Arc<DailyStreakService>,
}

impl AwardFlameCommandHandler {
    pub fn new(
        resolver: Arc<dyn UserIdentityResolver>,
        streak_service: Arc<DailyStreakService>,
    ) -> Self {
        Self {
            resolver,
            streak_service,
        }
    }
}

#[async_trait]
impl CommandHandler<AwardFlameCommand> for AwardFlameCommandHandler {
    type Result = StreakAwardDto;

    async fn handle(&self, cmd: AwardFlameCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling AwardFlameCommand for user '{}' (date: {:?})",
            cmd.user_name, cmd.date
        );

        let date = match cmd.date.as_deref() {
            Some(raw) => DateKey::parse(raw)?,
            None => DateKey::today_utc(),
        };
        let user = self.resolver.resolve(&cmd.user_name).await?;

        let award = self.streak_service.award_for_date(&user, date).await?;
        Ok(award.outcome.into())
    }
}
