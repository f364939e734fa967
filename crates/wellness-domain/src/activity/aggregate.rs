use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::ActivitySlot;
use crate::shared::{DateKey, UserId, UserRef};

/// Ledger entry marking one (user, date, slot) as completed.
///
/// `completed` only ever moves from false to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCompletion {
    id: String,
    user_id: UserId,
    user_name: String,
    date: DateKey,
    slot: ActivitySlot,
    completed: bool,
    completed_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ActivityCompletion {
    /// Deterministic document id, one per (user, date, slot).
    pub fn make_id(user_id: &UserId, date: &DateKey, slot: ActivitySlot) -> String {
        format!("{}:{}:{}", user_id.as_str(), date, slot)
    }

    /// A fresh record that is already completed.
    pub fn completed_now(user: &UserRef, date: DateKey, slot: ActivitySlot, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::make_id(&user.id, &date, slot),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            date,
            slot,
            completed: true,
            completed_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: String,
        user_id: UserId,
        user_name: String,
        date: DateKey,
        slot: ActivitySlot,
        completed: bool,
        completed_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            user_name,
            date,
            slot,
            completed,
            completed_at,
            created_at,
            updated_at,
        }
    }

    /// Flip to completed. Returns false, leaving the record untouched, when it
    /// was already completed.
    pub fn mark_completed(&mut self, user_name: &str, now: DateTime<Utc>) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.completed_at = now;
        self.updated_at = now;
        self.user_name = user_name.to_string();
        true
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

    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn slot(&self) -> ActivitySlot {
        self.slot
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
