use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::application::commands::handlers::*;
use crate::application::queries::{ActivityQueryService, PlanQueryService, StreakQueryService};
use crate::application::services::{
    ActivityLedgerService, CompletionCounterService, DailyStreakService, PlanHydrationService,
    PlanService, StreakRepairService, UserService,
};
use crate::application::ResultExt;
use crate::presentation::state::{AppState, CommandHandlers, Queries, Runtime, Services};
use wellness_domain::plan::PlanGenerator;
use wellness_domain::shared::{DocumentStore, DomainError};
use wellness_domain::user::UserIdentityResolver;
use wellness_infrastructure::config::AppConfig;
use wellness_infrastructure::llm::OpenAiPlanGenerator;
use wellness_infrastructure::persistence::repositories::{
    DocumentActivityCompletionRepository, DocumentActivityPlanRepository,
    DocumentCompletionCounterRepository, DocumentDailyStreakRepository,
    DocumentDassScoreRepository, DocumentUserRepository,
};
use wellness_infrastructure::persistence::{Database, InMemoryDocumentStore, SqliteDocumentStore};

/// Where documents live for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite file at `AppConfig::db_path`
    Sqlite,
    /// Process memory; everything is gone on exit
    InMemory,
}

pub async fn build_app_state(
    config: &AppConfig,
    backend: StoreBackend,
) -> Result<AppState, DomainError> {
    let startup_started_at = Instant::now();

    let (store, db): (Arc<dyn DocumentStore>, Option<Arc<Database>>) = match backend {
        StoreBackend::Sqlite => {
            let started_at = Instant::now();
            if let Some(parent) = config.db_path.parent() {
                std::fs::create_dir_all(parent).to_infra_err()?;
            }
            let db_path = config.db_path.to_str().ok_or_else(|| {
                DomainError::Validation(format!(
                    "Invalid database path: {}",
                    config.db_path.display()
                ))
            })?;

            let db = Arc::new(Database::new(db_path).await?);
            db.run_migrations().await?;
            info!(
                "✓ Database ready at {} ({}ms)",
                db_path,
                started_at.elapsed().as_millis()
            );

            let store: Arc<dyn DocumentStore> =
                Arc::new(SqliteDocumentStore::new(db.pool().clone()));
            (store, Some(db))
        }
        StoreBackend::InMemory => {
            info!("Using in-memory document store; nothing will be persisted");
            let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
            (store, None)
        }
    };

    let generator: Option<Arc<dyn PlanGenerator>> = if config.llm.api_key.is_some() {
        let generator: Arc<dyn PlanGenerator> =
            Arc::new(OpenAiPlanGenerator::new(&config.llm, &config.timeouts)?);
        info!("✓ Plan generator configured (model: {})", config.llm.model);
        Some(generator)
    } else {
        warn!("OPENAI_API_KEY is not set; plan generation is disabled");
        None
    };

    let state = assemble(store, db, generator);
    info!(
        "✓ App state initialized ({}ms)",
        startup_started_at.elapsed().as_millis()
    );
    Ok(state)
}

/// Wire repositories, services, queries and handlers over one store.
pub fn assemble(
    store: Arc<dyn DocumentStore>,
    db: Option<Arc<Database>>,
    generator: Option<Arc<dyn PlanGenerator>>,
) -> AppState {
    // Repositories
    let completion_repo = Arc::new(DocumentActivityCompletionRepository::new(store.clone()));
    let plan_repo = Arc::new(DocumentActivityPlanRepository::new(store.clone()));
    let counter_repo = Arc::new(DocumentCompletionCounterRepository::new(store.clone()));
    let streak_repo = Arc::new(DocumentDailyStreakRepository::new(store.clone()));
    let score_repo = Arc::new(DocumentDassScoreRepository::new(store.clone()));
    let user_repo = Arc::new(DocumentUserRepository::new(store.clone()));

    // Services
    let user = Arc::new(UserService::new(user_repo));
    let ledger = Arc::new(ActivityLedgerService::new(completion_repo));
    let streak = Arc::new(DailyStreakService::new(streak_repo.clone()));
    let counter = Arc::new(CompletionCounterService::new(counter_repo));
    let repair = Arc::new(StreakRepairService::new(streak_repo, counter.clone()));
    let hydration = Arc::new(PlanHydrationService::new(ledger.clone()));
    let plan = Arc::new(PlanService::new(
        generator,
        plan_repo,
        score_repo,
        hydration.clone(),
    ));

    let resolver: Arc<dyn UserIdentityResolver> = user.clone();

    // Queries
    let queries = Queries {
        activity: Arc::new(ActivityQueryService::new(resolver.clone(), ledger.clone())),
        streak: Arc::new(StreakQueryService::new(
            resolver.clone(),
            streak.clone(),
            counter.clone(),
        )),
        plan: Arc::new(PlanQueryService::new(resolver.clone(), plan.clone())),
    };

    // Command handlers
    let complete_activity = Arc::new(CompleteActivityCommandHandler::new(
        resolver.clone(),
        ledger.clone(),
        streak.clone(),
        counter.clone(),
    ));
    let command_handlers = CommandHandlers {
        sign_in: Arc::new(SignInCommandHandler::new(user.clone())),
        complete_day: Arc::new(CompleteDayCommandHandler::new(
            resolver.clone(),
            complete_activity.clone(),
        )),
        complete_activity,
        award_flame: Arc::new(AwardFlameCommandHandler::new(
            resolver.clone(),
            streak.clone(),
        )),
        repair_streak: Arc::new(RepairStreakCommandHandler::new(
            resolver.clone(),
            repair.clone(),
            counter.clone(),
        )),
        generate_plan: Arc::new(GeneratePlanCommandHandler::new(resolver, plan.clone())),
    };

    AppState {
        runtime: Runtime { store, db },
        services: Services {
            user,
            ledger,
            streak,
            counter,
            repair,
            hydration,
            plan,
        },
        queries,
        command_handlers,
    }
}
