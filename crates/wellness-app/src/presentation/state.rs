use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::queries::{ActivityQueryService, PlanQueryService, StreakQueryService};
use crate::application::services::{
    ActivityLedgerService, CompletionCounterService, DailyStreakService, PlanHydrationService,
    PlanService, StreakRepairService, UserService,
};
use wellness_domain::shared::DocumentStore;
use wellness_infrastructure::persistence::Database;

/// Command handlers container
pub struct CommandHandlers {
    pub sign_in: Arc<SignInCommandHandler>,
    pub complete_activity: Arc<CompleteActivityCommandHandler>,
    pub complete_day: Arc<CompleteDayCommandHandler>,
    pub award_flame: Arc<AwardFlameCommandHandler>,
    pub repair_streak: Arc<RepairStreakCommandHandler>,
    pub generate_plan: Arc<GeneratePlanCommandHandler>,
}

pub struct Runtime {
    pub store: Arc<dyn DocumentStore>,
    /// Set when the store is backed by a SQLite file.
    pub db: Option<Arc<Database>>,
}

pub struct Services {
    pub user: Arc<UserService>,
    pub ledger: Arc<ActivityLedgerService>,
    pub streak: Arc<DailyStreakService>,
    pub counter: Arc<CompletionCounterService>,
    pub repair: Arc<StreakRepairService>,
    pub hydration: Arc<PlanHydrationService>,
    pub plan: Arc<PlanService>,
}

pub struct Queries {
    pub activity: Arc<ActivityQueryService>,
    pub streak: Arc<StreakQueryService>,
    pub plan: Arc<PlanQueryService>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub services: Services,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}
