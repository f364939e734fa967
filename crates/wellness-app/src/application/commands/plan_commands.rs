use wellness_domain::dass::Dass21Scores;

use crate::application::commands::command_handler::Command;

/// Generate and store a 7-day plan from DASS-21 scores
#[derive(Debug, Clone)]
pub struct GeneratePlanCommand {
    pub user_name: String,
    pub scores: Dass21Scores,
}

impl Command for GeneratePlanCommand {}
