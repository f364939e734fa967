use crate::application::commands::command_handler::Command;

/// Award the daily flame directly. `date` defaults to today (UTC).
#[derive(Debug, Clone)]
pub struct AwardFlameCommand {
    pub user_name: String,
    pub date: Option<String>,
}

impl Command for AwardFlameCommand {}

/// Spend credit to bridge a one-day gap ending at `date`
#[derive(Debug, Clone)]
pub struct RepairStreakCommand {
    pub user_name: String,
    pub date: String,
}

impl Command for RepairStreakCommand {}
