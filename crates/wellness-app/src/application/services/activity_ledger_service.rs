use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

use wellness_domain::activity::{
    ActivityCompletion, ActivityCompletionRepository, ActivitySlot, SlotFlags,
};
use wellness_domain::shared::{clock, DateKey, DomainError, UserId, UserRef};

/// Outcome of recording one slot completion.
#[derive(Debug, Clone)]
pub struct RecordedCompletion {
    pub record: ActivityCompletion,
    /// False when the slot was already completed and nothing was written.
    pub is_new: bool,
}

#[derive(Debug, Clone)]
pub struct SlotStatus {
    pub completed: bool,
    pub record: Option<ActivityCompletion>,
}

#[derive(Debug, Clone)]
pub struct DayStatus {
    pub date: DateKey,
    pub flags: SlotFlags,
    pub records: Vec<ActivityCompletion>,
}

/// Per-user ledger of completed (date, slot) pairs.
pub struct ActivityLedgerService {
    completion_repo: Arc<dyn ActivityCompletionRepository>,
}

impl ActivityLedgerService {
    pub fn new(completion_repo: Arc<dyn ActivityCompletionRepository>) -> Self {
        Self { completion_repo }
    }

    /// Mark a slot completed. Idempotent: a slot that is already completed is
    /// returned as stored, with `is_new = false`.
    pub async fn record_completion(
        &self,
        user: &UserRef,
        date: DateKey,
        slot: ActivitySlot,
    ) -> Result<RecordedCompletion, DomainError> {
        let existing = self.completion_repo.find(&user.id, &date, slot).await?;

        let record = match existing {
            Some(record) if record.is_completed() => {
                debug!(
                    "[ledger] {} {} already completed for user {}",
                    date, slot, user.id
                );
                return Ok(RecordedCompletion {
                    record,
                    is_new: false,
                });
            }
            Some(mut record) => {
                record.mark_completed(&user.name, clock::now());
                record
            }
            None => ActivityCompletion::completed_now(user, date, slot, clock::now()),
        };

        let saved = self.completion_repo.upsert(&record).await?;
        info!(
            "[ledger] recorded {} {} for user {} ({})",
            date, slot, user.id, user.name
        );

        Ok(RecordedCompletion {
            record: saved,
            is_new: true,
        })
    }

    pub async fn get_slot_status(
        &self,
        user_id: &UserId,
        date: DateKey,
        slot: ActivitySlot,
    ) -> Result<SlotStatus, DomainError> {
        let record = self.completion_repo.find(user_id, &date, slot).await?;
        Ok(SlotStatus {
            completed: record.as_ref().is_some_and(ActivityCompletion::is_completed),
            record,
        })
    }

    pub async fn get_day_status(
        &self,
        user_id: &UserId,
        date: DateKey,
    ) -> Result<DayStatus, DomainError> {
        let records = self.completion_repo.find_by_day(user_id, &date).await?;

        let mut flags = SlotFlags::default();
        for record in records.iter().filter(|r| r.is_completed()) {
            flags.set(record.slot(), true);
        }

        Ok(DayStatus {
            date,
            flags,
            records,
        })
    }

    /// Ledger entries with `start <= date <= end`, oldest first.
    pub async fn get_range_status(
        &self,
        user_id: &UserId,
        start: DateKey,
        end: DateKey,
    ) -> Result<Vec<ActivityCompletion>, DomainError> {
        if start > end {
            return Err(DomainError::Validation(format!(
                "startDate {} is after endDate {}",
                start, end
            )));
        }

        self.completion_repo
            .find_in_range(user_id, &start, &end)
            .await
    }

    /// Completed (date, slot) pairs in `[start, end]`.
    pub async fn completed_slots(
        &self,
        user_id: &UserId,
        start: DateKey,
        end: DateKey,
    ) -> Result<HashSet<(DateKey, ActivitySlot)>, DomainError> {
        let records = self.get_range_status(user_id, start, end).await?;
        Ok(records
            .iter()
            .filter(|r| r.is_completed())
            .map(|r| (r.date(), r.slot()))
            .collect())
    }
}
