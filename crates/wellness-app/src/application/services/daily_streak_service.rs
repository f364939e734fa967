use log::{debug, info};
use std::sync::Arc;

use wellness_domain::shared::{clock, DateKey, DomainError, UserRef};
use wellness_domain::streak::{AwardOutcome, DailyStreak, DailyStreakRepository};

#[derive(Debug, Clone)]
pub struct StreakAward {
    pub outcome: AwardOutcome,
    pub streak: DailyStreak,
}

pub struct DailyStreakService {
    streak_repo: Arc<dyn DailyStreakRepository>,
}

impl DailyStreakService {
    pub fn new(streak_repo: Arc<dyn DailyStreakRepository>) -> Self {
        Self { streak_repo }
    }

    /// Award the day's flame. At most one award per date; nothing is written
    /// when `date` was already awarded.
    pub async fn award_for_date(
        &self,
        user: &UserRef,
        date: DateKey,
    ) -> Result<StreakAward, DomainError> {
        let now = clock::now();

        let (streak, awarded) = match self.streak_repo.find_by_user_id(&user.id).await? {
            None => (DailyStreak::start(user, date, now), true),
            Some(mut streak) => {
                let awarded = streak.award(date, &user.name, now);
                (streak, awarded)
            }
        };

        if !awarded {
            debug!("[streak] {} already awarded for user {}", date, user.id);
            return Ok(StreakAward {
                outcome: streak.outcome(false),
                streak,
            });
        }

        let saved = self.streak_repo.upsert(&streak).await?;
        info!(
            "[streak] awarded {} for user {}: current={} longest={}",
            date,
            user.id,
            saved.current_streak(),
            saved.longest_streak()
        );

        Ok(StreakAward {
            outcome: saved.outcome(true),
            streak: saved,
        })
    }

    /// Stored streak, or a zero-value one (never persisted) for new users.
    pub async fn get_for_user(&self, user: &UserRef) -> Result<DailyStreak, DomainError> {
        Ok(self
            .streak_repo
            .find_by_user_id(&user.id)
            .await?
            .unwrap_or_else(|| DailyStreak::empty(user, clock::now())))
    }
}
