use async_trait::async_trait;
use log::info;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::application::commands::activity_commands::CompleteDayCommand;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::handlers::CompleteActivityCommandHandler;
use crate::application::dtos::CompleteDayResult;
use wellness_domain::activity::ActivitySlot;
use wellness_domain::shared::{DateKey, DomainError};
use wellness_domain::user::UserIdentityResolver;

/// Completes each requested slot of one day in turn.
pub struct CompleteDayCommandHandler {
    resolver: Arc<dyn UserIdentityResolver>,
    complete_activity: Arc<CompleteActivityCommandHandler>,
}

impl CompleteDayCommandHandler {
    pub fn new(
        resolver: Arc<dyn UserIdentityResolver>,
        complete_activity: Arc<CompleteActivityCommandHandler>,
    ) -> Self {
        Self {
            resolver,
            complete_activity,
        }
    }
}

#[async_trait]
impl CommandHandler<CompleteDayCommand> for CompleteDayCommandHandler {
    type Result = CompleteDayResult;

    async fn handle(&self, cmd: CompleteDayCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling CompleteDayCommand for user '{}': {} {:?}",
            cmd.user_name, cmd.date, cmd.slots
        );

        // 1. Validate everything before touching the store
        let date = DateKey::parse(&cmd.date)?;
        let slots = cmd
            .slots
            .iter()
            .map(|s| s.parse::<ActivitySlot>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        if slots.is_empty() {
            return Err(DomainError::Validation(
                "at least one slot is required".to_string(),
            ));
        }

        let user = self.resolver.resolve(&cmd.user_name).await?;

        // 2. Apply slot by slot; a failure stops the remaining slots
        let mut results = Vec::with_capacity(slots.len());
        for slot in slots {
            results.push(self.complete_activity.complete_for(&user, date, slot).await?);
        }

        Ok(CompleteDayResult {
            date: date.to_string(),
            results,
        })
    }
}
