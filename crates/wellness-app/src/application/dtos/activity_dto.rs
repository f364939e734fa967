use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_domain::activity::ActivityCompletion;

use super::{ActivityStreakDto, StreakAwardDto};
use crate::application::services::{DayStatus, SlotStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionDto {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub date: String, // YYYY-MM-DD
    pub slot: String,
    pub completed: bool,
    pub completed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ActivityCompletion> for CompletionDto {
    fn from(record: &ActivityCompletion) -> Self {
        Self {
            id: record.id().to_string(),
            user_id: record.user_id().as_str().to_string(),
            user_name: record.user_name().to_string(),
            date: record.date().to_string(),
            slot: record.slot().to_string(),
            completed: record.is_completed(),
            completed_at: record.completed_at(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }
}

/// Result of completing one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteActivityResult {
    /// False when the slot had already been completed.
    pub changed: bool,
    pub completion: CompletionDto,
    pub streak: StreakAwardDto,
    /// Present only when a new completion was counted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_streak: Option<ActivityStreakDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteDayResult {
    pub date: String,
    /// One entry per distinct slot, Morning to Evening.
    pub results: Vec<CompleteActivityResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatusDto {
    pub completed: bool,
    pub completion: Option<CompletionDto>,
}

impl From<SlotStatus> for SlotStatusDto {
    fn from(status: SlotStatus) -> Self {
        Self {
            completed: status.completed,
            completion: status.record.as_ref().map(CompletionDto::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStatusDto {
    pub date: String,
    #[serde(rename = "Morning")]
    pub morning: bool,
    #[serde(rename = "Afternoon")]
    pub afternoon: bool,
    #[serde(rename = "Evening")]
    pub evening: bool,
    pub completions: Vec<CompletionDto>,
}

impl From<DayStatus> for DayStatusDto {
    fn from(status: DayStatus) -> Self {
        Self {
            date: status.date.to_string(),
            morning: status.flags.morning,
            afternoon: status.flags.afternoon,
            evening: status.flags.evening,
            completions: status.records.iter().map(CompletionDto::from).collect(),
        }
    }
}
