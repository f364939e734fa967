use log::info;
use std::sync::Arc;

use wellness_domain::completion_counter::{CompletionCounter, CompletionCounterRepository};
use wellness_domain::shared::{clock, DateKey, DomainError, UserRef};

/// Lifetime completion total, spendable as credit.
pub struct CompletionCounterService {
    counter_repo: Arc<dyn CompletionCounterRepository>,
}

impl CompletionCounterService {
    pub fn new(counter_repo: Arc<dyn CompletionCounterRepository>) -> Self {
        Self { counter_repo }
    }

    /// Add `amount` for completions made on `date`.
    pub async fn increment(
        &self,
        user: &UserRef,
        amount: u64,
        date: DateKey,
    ) -> Result<CompletionCounter, DomainError> {
        let now = clock::now();

        let counter = match self.counter_repo.find_by_user_id(&user.id).await? {
            Some(mut counter) => {
                counter.increment(amount, &user.name, now);
                counter
            }
            None => CompletionCounter::start(user, amount, now),
        };

        let saved = self.counter_repo.upsert(&counter).await?;
        info!(
            "[counter] +{} for {} (user {}): total={}",
            amount,
            date,
            user.id,
            saved.total_completions()
        );
        Ok(saved)
    }

    /// Deduct `amount`. Fails without writing when the user has no counter or
    /// not enough credit.
    pub async fn spend(&self, user: &UserRef, amount: u64) -> Result<CompletionCounter, DomainError> {
        let mut counter = self
            .counter_repo
            .find_by_user_id(&user.id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound("No completion streak found for user".to_string())
            })?;

        counter.spend(amount, clock::now())?;

        let saved = self.counter_repo.upsert(&counter).await?;
        info!(
            "[counter] spent {} for user {}: total={}",
            amount,
            user.id,
            saved.total_completions()
        );
        Ok(saved)
    }

    /// Give back credit taken by [`Self::spend`] when the operation it paid
    /// for could not be saved.
    pub async fn refund(&self, user: &UserRef, amount: u64) -> Result<CompletionCounter, DomainError> {
        let mut counter = self
            .counter_repo
            .find_by_user_id(&user.id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound("No completion streak found for user".to_string())
            })?;

        counter.refund(amount, clock::now());
        let saved = self.counter_repo.upsert(&counter).await?;
        info!(
            "[counter] refunded {} for user {}: total={}",
            amount,
            user.id,
            saved.total_completions()
        );
        Ok(saved)
    }

    pub async fn get_for_user(&self, user: &UserRef) -> Result<CompletionCounter, DomainError> {
        Ok(self
            .counter_repo
            .find_by_user_id(&user.id)
            .await?
            .unwrap_or_else(|| CompletionCounter::empty(user, clock::now())))
    }
}
