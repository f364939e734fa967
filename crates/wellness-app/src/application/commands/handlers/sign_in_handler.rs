use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::user_commands::SignInCommand;
use crate::application::dtos::{SignInResult, UserDto};
use crate::application::services::UserService;
use wellness_domain::shared::DomainError;

pub struct SignInCommandHandler {
    user_service: Arc<UserService>,
}

impl SignInCommandHandler {
    pub fn new(user_service: Arc<UserService>) -> Self {
        Self { user_service }
    }
}

#[async_trait]
impl CommandHandler<SignInCommand> for SignInCommandHandler {
    type Result = SignInResult;

    async fn handle(&self, cmd: SignInCommand) -> Result<Self::Result, DomainError> {
        info!("Handling SignInCommand for '{}'", cmd.name.trim());

        let outcome = self.user_service.sign_in_with_name(&cmd.name).await?;
        Ok(SignInResult {
            user: UserDto::from(&outcome.user),
            is_new: outcome.is_new,
        })
    }
}
