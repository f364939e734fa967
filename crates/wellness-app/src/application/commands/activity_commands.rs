use crate::application::commands::command_handler::Command;

/// Complete one slot on one day
#[derive(Debug, Clone)]
pub struct CompleteActivityCommand {
    pub user_name: String,
    pub date: String,
    pub slot: String,
}

impl Command for CompleteActivityCommand {}

/// Complete several slots on one day, applied Morning to Evening
#[derive(Debug, Clone)]
pub struct CompleteDayCommand {
    pub user_name: String,
    pub date: String,
    pub slots: Vec<String>,
}

impl Command for CompleteDayCommand {}
