use std::sync::Arc;

use crate::application::dtos::{ActivityStreakDto, DailyStreakDto, StreakSummaryDto};
use crate::application::services::{CompletionCounterService, DailyStreakService};
use wellness_domain::shared::DomainError;
use wellness_domain::user::UserIdentityResolver;

pub struct StreakQueryService {
    resolver: Arc<dyn UserIdentityResolver>,
    streak_service: Arc<DailyStreakService>,
    counter_service: Arc<CompletionCounterService>,
}

impl StreakQueryService {
    pub fn new(
        resolver: Arc<dyn UserIdentityResolver>,
        streak_service: Arc<DailyStreakService>,
        counter_service: Arc<CompletionCounterService>,
    ) -> Self {
        Self {
            resolver,
            streak_service,
            counter_service,
        }
    }

    /// Daily streak and completion total; zero values for users with
    /// neither record yet.
    pub async fn get_streak(&self, user_name: &str) -> Result<StreakSummaryDto, DomainError> {
        let user = self.resolver.resolve(user_name).await?;

        let streak = self.streak_service.get_for_user(&user).await?;
        let counter = self.counter_service.get_for_user(&user).await?;

        Ok(StreakSummaryDto {
            user_id: user.id.as_str().to_string(),
            user_name: user.name.clone(),
            streak: DailyStreakDto::from(&streak),
            activity_streak: ActivityStreakDto::from(&counter),
        })
    }
}
