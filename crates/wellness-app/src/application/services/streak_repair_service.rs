use log::{error, info, warn};
use std::sync::Arc;

use wellness_domain::shared::{clock, DateKey, DomainError, UserRef};
use wellness_domain::streak::{DailyStreak, DailyStreakRepository, REPAIR_COST};

use super::CompletionCounterService;

/// Spends completion credit to bridge a single missed day.
pub struct StreakRepairService {
    streak_repo: Arc<dyn DailyStreakRepository>,
    counter_service: Arc<CompletionCounterService>,
}

impl StreakRepairService {
    pub fn new(
        streak_repo: Arc<dyn DailyStreakRepository>,
        counter_service: Arc<CompletionCounterService>,
    ) -> Self {
        Self {
            streak_repo,
            counter_service,
        }
    }

    /// Repair the streak so that `date` continues it.
    ///
    /// Eligibility is checked before any credit is spent; a failed spend
    /// leaves both records untouched.
    pub async fn repair(&self, user: &UserRef, date: DateKey) -> Result<DailyStreak, DomainError> {
        // 1. Load streak and check the gap
        let mut streak = self
            .streak_repo
            .find_by_user_id(&user.id)
            .await?
            .ok_or_else(|| {
                DomainError::IneligibleRepair("No eligible streak to repair".to_string())
            })?;
        streak.check_repairable(&date)?;

        // 2. Pay for it
        self.counter_service.spend(user, REPAIR_COST).await?;

        // 3. Apply and save
        streak.apply_repair(date, clock::now())?;
        match self.streak_repo.upsert(&streak).await {
            Ok(saved) => {
                info!(
                    "[repair] user {} repaired to {}: current={}",
                    user.id,
                    date,
                    saved.current_streak()
                );
                Ok(saved)
            }
            Err(e) => {
                warn!(
                    "[repair] saving repaired streak for user {} failed, refunding: {}",
                    user.id, e
                );
                if let Err(refund_err) = self.counter_service.refund(user, REPAIR_COST).await {
                    error!(
                        "[repair] refund of {} credits for user {} failed: {}",
                        REPAIR_COST, user.id, refund_err
                    );
                }
                Err(e)
            }
        }
    }
}
