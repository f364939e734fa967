use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_domain::completion_counter::CompletionCounter;
use wellness_domain::streak::{AwardOutcome, DailyStreak};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakAwardDto {
    pub awarded: bool,
    pub current_streak: u32,
    pub last_awarded_date: Option<String>, // YYYY-MM-DD
}

impl From<AwardOutcome> for StreakAwardDto {
    fn from(outcome: AwardOutcome) -> Self {
        Self {
            awarded: outcome.awarded,
            current_streak: outcome.current_streak,
            last_awarded_date: outcome.last_awarded_date.map(|d| d.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStreakDto {
    pub total_completions: u64,
}

impl From<&CompletionCounter> for ActivityStreakDto {
    fn from(counter: &CompletionCounter) -> Self {
        Self {
            total_completions: counter.total_completions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStreakDto {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_awarded_date: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DailyStreak> for DailyStreakDto {
    fn from(streak: &DailyStreak) -> Self {
        Self {
            current_streak: streak.current_streak(),
            longest_streak: streak.longest_streak(),
            last_awarded_date: streak.last_awarded_date().map(|d| d.to_string()),
            updated_at: streak.updated_at(),
        }
    }
}

/// Both streak views for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummaryDto {
    pub user_id: String,
    pub user_name: String,
    pub streak: DailyStreakDto,
    pub activity_streak: ActivityStreakDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairStreakResult {
    pub streak: DailyStreakDto,
    /// Credit left after paying for the repair.
    pub activity_streak: ActivityStreakDto,
}
