mod activity_ledger_service;
mod completion_counter_service;
mod daily_streak_service;
mod plan_hydration_service;
mod plan_service;
mod streak_repair_service;
mod user_service;

#[cfg(test)]
mod tests;

pub use activity_ledger_service::{ActivityLedgerService, DayStatus, RecordedCompletion, SlotStatus};
pub use completion_counter_service::CompletionCounterService;
pub use daily_streak_service::{DailyStreakService, StreakAward};
pub use plan_hydration_service::PlanHydrationService;
pub use plan_service::{GeneratedPlan, PlanService};
pub use streak_repair_service::StreakRepairService;
pub use user_service::{SignInOutcome, UserService};
