use serde::Serialize;
use serde_json::Value;

use crate::application::commands::*;
use crate::presentation::cli::CliCommand;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use wellness_domain::dass::Dass21Scores;

fn to_json<T: Serialize>(value: T) -> Result<Value, CommandError> {
    Ok(serde_json::to_value(value)?)
}

/// Run one CLI command against the app state and return its JSON result.
pub async fn execute(state: &AppState, command: CliCommand) -> Result<Value, CommandError> {
    let handlers = &state.command_handlers;
    let queries = &state.queries;

    match command {
        CliCommand::SignIn { name } => {
            to_json(handlers.sign_in.handle(SignInCommand { name }).await?)
        }
        CliCommand::Complete { user, date, slot } => {
            let cmd = CompleteActivityCommand {
                user_name: user.user,
                date,
                slot,
            };
            to_json(handlers.complete_activity.handle(cmd).await?)
        }
        CliCommand::CompleteDay { user, date, slots } => {
            let cmd = CompleteDayCommand {
                user_name: user.user,
                date,
                slots,
            };
            to_json(handlers.complete_day.handle(cmd).await?)
        }
        CliCommand::Award { user, date } => {
            let cmd = AwardFlameCommand {
                user_name: user.user,
                date,
            };
            to_json(handlers.award_flame.handle(cmd).await?)
        }
        CliCommand::Repair { user, date } => {
            let cmd = RepairStreakCommand {
                user_name: user.user,
                date,
            };
            to_json(handlers.repair_streak.handle(cmd).await?)
        }
        CliCommand::Streak { user } => to_json(queries.streak.get_streak(&user.user).await?),
        CliCommand::SlotStatus { user, date, slot } => to_json(
            queries
                .activity
                .get_slot_status(&user.user, &date, &slot)
                .await?,
        ),
        CliCommand::DayStatus { user, date } => {
            to_json(queries.activity.get_day_status(&user.user, &date).await?)
        }
        CliCommand::RangeStatus { user, start, end } => to_json(
            queries
                .activity
                .get_range_status(&user.user, &start, &end)
                .await?,
        ),
        CliCommand::GeneratePlan {
            user,
            depression,
            anxiety,
            stress,
        } => {
            let cmd = GeneratePlanCommand {
                user_name: user.user,
                scores: Dass21Scores::new(depression, anxiety, stress)?,
            };
            to_json(handlers.generate_plan.handle(cmd).await?)
        }
        CliCommand::LatestPlan { user } => {
            let latest = queries
                .plan
                .get_latest_plan(&user.user)
                .await?
                .ok_or_else(|| CommandError::not_found("No plan found for user"))?;
            to_json(latest)
        }
    }
}
