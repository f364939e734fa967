use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use wellness_domain::shared::{clock, DomainError, UserRef};
use wellness_domain::user::{UserIdentityResolver, UserRecord, UserRepository};

#[derive(Debug, Clone)]
pub struct SignInOutcome {
    pub user: UserRecord,
    pub is_new: bool,
}

/// Name-only sign-in: a display name maps to exactly one user.
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn sign_in_with_name(&self, raw_name: &str) -> Result<SignInOutcome, DomainError> {
        let name = UserRecord::normalize_name(raw_name)?;

        if let Some(user) = self.touch_existing(&name).await? {
            return Ok(SignInOutcome {
                user,
                is_new: false,
            });
        }

        let user = UserRecord::new(&name, clock::now())?;
        match self.user_repo.create(&user).await {
            Ok(created) => {
                info!("Created user {} ({})", created.id(), created.name());
                Ok(SignInOutcome {
                    user: created,
                    is_new: true,
                })
            }
            Err(DomainError::Conflict(msg)) => {
                // Lost a race against another sign-in with the same name
                warn!("User create for '{}' conflicted, re-reading: {}", name, msg);
                let user = self.touch_existing(&name).await?.ok_or_else(|| {
                    DomainError::Conflict(format!("user '{}' could not be resolved", name))
                })?;
                Ok(SignInOutcome {
                    user,
                    is_new: false,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn touch_existing(&self, name: &str) -> Result<Option<UserRecord>, DomainError> {
        let Some(mut user) = self.user_repo.find_by_name(name).await? else {
            return Ok(None);
        };
        user.touch(clock::now());
        Ok(Some(self.user_repo.save(&user).await?))
    }
}

#[async_trait]
impl UserIdentityResolver for UserService {
    async fn resolve(&self, display_name: &str) -> Result<UserRef, DomainError> {
        let outcome = self.sign_in_with_name(display_name).await?;
        Ok(outcome.user.to_user_ref())
    }
}
