use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DateKey, DomainError, UserId, UserRef};

/// Completion credits spent by one streak repair.
pub const REPAIR_COST: u64 = 5;

/// Result of awarding a flame for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardOutcome {
    pub awarded: bool,
    pub current_streak: u32,
    pub last_awarded_date: Option<DateKey>,
}

/// Per-user run of consecutive UTC days with at least one awarded completion.
///
/// Invariant: `current_streak > 0` implies `last_awarded_date` is set, and
/// `longest_streak >= current_streak`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStreak {
    id: String,
    user_id: UserId,
    user_name: String,
    current_streak: u32,
    longest_streak: u32,
    last_awarded_date: Option<DateKey>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DailyStreak {
    /// First award for a user: a streak of one on `date`.
    pub fn start(user: &UserRef, date: DateKey, now: DateTime<Utc>) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            current_streak: 1,
            longest_streak: 1,
            last_awarded_date: Some(date),
            created_at: now,
            updated_at: now,
        }
    }

    /// Zero-value placeholder for users without a stored record. Never persisted.
    pub fn empty(user: &UserRef, now: DateTime<Utc>) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            current_streak: 0,
            longest_streak: 0,
            last_awarded_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: String,
        user_id: UserId,
        user_name: String,
        current_streak: u32,
        longest_streak: u32,
        last_awarded_date: Option<DateKey>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            user_name,
            current_streak,
            longest_streak: longest_streak.max(current_streak),
            last_awarded_date,
            created_at,
            updated_at,
        }
    }

    /// Award a flame for `date`.
    ///
    /// Same date as the last award: no-op. The day right after: extend.
    /// Anything else, including dates before the last award: restart at 1.
    pub fn award(&mut self, date: DateKey, user_name: &str, now: DateTime<Utc>) -> bool {
        if self.last_awarded_date == Some(date) {
            return false;
        }

        self.current_streak = match self.last_awarded_date {
            Some(last) if last.is_followed_by(&date) => self.current_streak + 1,
            _ => 1,
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_awarded_date = Some(date);
        self.user_name = user_name.to_string();
        self.updated_at = now;
        true
    }

    /// Check that `date` closes exactly one missed day after the last award.
    pub fn check_repairable(&self, date: &DateKey) -> Result<(), DomainError> {
        let last = self.last_awarded_date.ok_or_else(|| {
            DomainError::IneligibleRepair("No eligible streak to repair".to_string())
        })?;

        if last.days_until(date) != 2 {
            return Err(DomainError::IneligibleRepair(
                "Repair allowed only for exactly one missed day gap".to_string(),
            ));
        }

        Ok(())
    }

    /// Restore continuity across the gap day. The gap itself earns no flame;
    /// only `date` counts.
    pub fn apply_repair(&mut self, date: DateKey, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.check_repairable(&date)?;
        self.current_streak += 1;
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_awarded_date = Some(date);
        self.updated_at = now;
        Ok(())
    }

    pub fn outcome(&self, awarded: bool) -> AwardOutcome {
        AwardOutcome {
            awarded,
            current_streak: self.current_streak,
            last_awarded_date: self.last_awarded_date,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn last_awarded_date(&self) -> Option<DateKey> {
        self.last_awarded_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
