use std::sync::Arc;

use crate::application::dtos::{CompletionDto, DayStatusDto, SlotStatusDto};
use crate::application::services::ActivityLedgerService;
use wellness_domain::activity::ActivitySlot;
use wellness_domain::shared::{DateKey, DomainError};
use wellness_domain::user::UserIdentityResolver;

/// Activity query service
/// Read side of the completion ledger, addressed by display name
pub struct ActivityQueryService {
    resolver: Arc<dyn UserIdentityResolver>,
    ledger: Arc<ActivityLedgerService>,
}

impl ActivityQueryService {
    pub fn new(
        resolver: Arc<dyn UserIdentityResolver>,
        ledger: Arc<ActivityLedgerService>,
    ) -> Self {
        Self { resolver, ledger }
    }

    pub async fn get_slot_status(
        &self,
        user_name: &str,
        date: &str,
        slot: &str,
    ) -> Result<SlotStatusDto, DomainError> {
        let date = DateKey::parse(date)?;
        let slot: ActivitySlot = slot.parse()?;
        let user = self.resolver.resolve(user_name).await?;

        let status = self.ledger.get_slot_status(&user.id, date, slot).await?;
        Ok(status.into())
    }

    pub async fn get_day_status(
        &self,
        user_name: &str,
        date: &str,
    ) -> Result<DayStatusDto, DomainError> {
        let date = DateKey::parse(date)?;
        let user = self.resolver.resolve(user_name).await?;

        let status = self.ledger.get_day_status(&user.id, date).await?;
        Ok(status.into())
    }

    /// Ledger entries between `start` and `end`, both inclusive
    pub async fn get_range_status(
        &self,
        user_name: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<CompletionDto>, DomainError> {
        let start = DateKey::parse(start)?;
        let end = DateKey::parse(end)?;
        if start > end {
            return Err(DomainError::Validation(format!(
                "startDate {} is after endDate {}",
                start, end
            )));
        }
        let user = self.resolver.resolve(user_name).await?;

        let records = self.ledger.get_range_status(&user.id, start, end).await?;
        Ok(records.iter().map(CompletionDto::from).collect())
    }
}
