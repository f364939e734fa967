use crate::application::commands::command_handler::Command;

#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub name: String,
}

impl Command for SignInCommand {}
