use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::activity_commands::CompleteActivityCommand;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::dtos::{ActivityStreakDto, CompleteActivityResult, CompletionDto};
use crate::application::services::{
    ActivityLedgerService, CompletionCounterService, DailyStreakService,
};
use wellness_domain::activity::ActivitySlot;
use wellness_domain::shared::{DateKey, DomainError, UserRef};
use wellness_domain::user::UserIdentityResolver;

/// Complete activity command handler
///
/// A new completion earns one completion credit and the day's flame; a repeat
/// completion changes nothing and reports the current streak.
pub struct CompleteActivityCommandHandler {
    resolver: Arc<dyn UserIdentityResolver>,
    ledger: Arc<ActivityLedgerService>,
    streak_service: Arc<DailyStreakService>,
    counter_service: Arc<CompletionCounterService>,
}

impl CompleteActivityCommandHandler {
    pub fn new(
        resolver: Arc<dyn UserIdentityResolver>,
        ledger: Arc<ActivityLedgerService>,
        streak_service: Arc<DailyStreakService>,
        counter_service: Arc<CompletionCounterService>,
    ) -> Self {
        Self {
            resolver,
            ledger,
            streak_service,
            counter_service,
        }
    }

    pub(crate) async fn complete_for(
        &self,
        user: &UserRef,
        date: DateKey,
        slot: ActivitySlot,
    ) -> Result<CompleteActivityResult, DomainError> {
        // 1. Record in the ledger
        let recorded = self.ledger.record_completion(user, date, slot).await?;

        if !recorded.is_new {
            let streak = self.streak_service.get_for_user(user).await?;
            return Ok(CompleteActivityResult {
                changed: false,
                completion: CompletionDto::from(&recorded.record),
                streak: streak.outcome(false).into(),
                activity_streak: None,
            });
        }

        // 2. Count the completion
        let counter = self.counter_service.increment(user, 1, date).await?;

        // 3. Award the day's flame
        let award = self.streak_service.award_for_date(user, date).await?;

        Ok(CompleteActivityResult {
            changed: true,
            completion: CompletionDto::from(&recorded.record),
            streak: award.outcome.into(),
            activity_streak: Some(ActivityStreakDto::from(&counter)),
        })
    }
}

#[async_trait]
impl CommandHandler<CompleteActivityCommand> for CompleteActivityCommandHandler {
    type Result = CompleteActivityResult;

    async fn handle(&self, cmd: CompleteActivityCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling CompleteActivityCommand for user '{}': {} {}",
            cmd.user_name, cmd.date, cmd.slot
        );

        let date = DateKey::parse(&cmd.date)?;
        let slot: ActivitySlot = cmd.slot.parse()?;
        let user = self.resolver.resolve(&cmd.user_name).await?;

        self.complete_for(&user, date, slot).await
    }
}
