use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId, UserRef};

/// Lifetime count of completed activity slots, spendable as credit.
///
/// Grows only through [`CompletionCounter::increment`]; shrinks only through
/// [`CompletionCounter::spend`], which never goes below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionCounter {
    id: String,
    user_id: UserId,
    user_name: String,
    total_completions: u64,
    last_increment_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CompletionCounter {
    pub fn make_id(user_id: &UserId) -> String {
        format!("{}:completion_streak", user_id.as_str())
    }

    pub fn start(user: &UserRef, amount: u64, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::make_id(&user.id),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            total_completions: amount,
            last_increment_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Zero-value placeholder for users without a stored record. Never persisted.
    pub fn empty(user: &UserRef, now: DateTime<Utc>) -> Self {
        Self::start(user, 0, now)
    }

    pub fn restore(
        id: String,
        user_id: UserId,
        user_name: String,
        total_completions: u64,
        last_increment_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            user_name,
            total_completions,
            last_increment_at,
            created_at,
            updated_at,
        }
    }

    pub fn increment(&mut self, amount: u64, user_name: &str, now: DateTime<Utc>) {
        self.total_completions = self.total_completions.saturating_add(amount);
        self.user_name = user_name.to_string();
        self.last_increment_at = now;
        self.updated_at = now;
    }

    /// Deduct `amount` credits. Fails without touching the record when the
    /// balance is too small.
    pub fn spend(&mut self, amount: u64, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.total_completions < amount {
            return Err(DomainError::InsufficientCredit(
                "Insufficient totalCompletions to spend".to_string(),
            ));
        }
        self.total_completions -= amount;
        self.updated_at = now;
        Ok(())
    }

    /// Give back credits taken by a spend whose follow-up step failed.
    /// Unlike `increment`, this does not count as new activity.
    pub fn refund(&mut self, amount: u64, now: DateTime<Utc>) {
        self.total_completions = self.total_completions.saturating_add(amount);
        self.updated_at = now;
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

    pub fn total_completions(&self) -> u64 {
        self.total_completions
    }

    pub fn last_increment_at(&self) -> DateTime<Utc> {
        self.last_increment_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
