use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::application::services::*;
use wellness_domain::activity::ActivitySlot;
use wellness_domain::dass::{Dass21Scores, DassScoreRecord, DassScoreRepository};
use wellness_domain::plan::PlanGenerator;
use wellness_domain::shared::{
    clock, ContainerSpec, DateKey, DocumentQuery, DocumentStore, DomainError, StoreError, UserId,
    UserRef,
};
use wellness_domain::streak::{DailyStreak, DailyStreakRepository};
use wellness_domain::user::{UserRecord, UserRepository};
use wellness_infrastructure::persistence::containers::STREAKS;
use wellness_infrastructure::persistence::repositories::*;
use wellness_infrastructure::persistence::InMemoryDocumentStore;

// Test doubles

/// Store whose backend is gone: every call fails with `Unavailable`.
struct UnavailableStore;

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn get(&self, _: &ContainerSpec, _: &str, _: &str) -> Result<Value, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn create(&self, _: &ContainerSpec, _: Value) -> Result<Value, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn replace(
        &self,
        _: &ContainerSpec,
        _: &str,
        _: &str,
        _: Value,
    ) -> Result<Value, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn query(&self, _: &ContainerSpec, _: &DocumentQuery) -> Result<Vec<Value>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// Streak repository that reads through but refuses every write.
struct ReadOnlyStreakRepository {
    inner: DocumentDailyStreakRepository,
}

#[async_trait]
impl DailyStreakRepository for ReadOnlyStreakRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<DailyStreak>, DomainError> {
        self.inner.find_by_user_id(user_id).await
    }

    async fn upsert(&self, _streak: &DailyStreak) -> Result<DailyStreak, DomainError> {
        Err(DomainError::StoreUnavailable("write timed out".to_string()))
    }
}

/// User repository where another sign-in always wins the create race.
struct RacingUserRepository {
    winner: UserRecord,
    lookups: tokio::sync::RwLock<usize>,
}

#[async_trait]
impl UserRepository for RacingUserRepository {
    async fn find_by_name(&self, _name: &str) -> Result<Option<UserRecord>, DomainError> {
        let mut lookups = self.lookups.write().await;
        *lookups += 1;
        // first lookup happens before the competing create lands
        Ok((*lookups > 1).then(|| self.winner.clone()))
    }

    async fn create(&self, _user: &UserRecord) -> Result<UserRecord, DomainError> {
        Err(DomainError::Conflict("users: unique key /name already taken".to_string()))
    }

    async fn save(&self, user: &UserRecord) -> Result<UserRecord, DomainError> {
        Ok(user.clone())
    }
}

mockall::mock! {
    Generator {}

    #[async_trait]
    impl PlanGenerator for Generator {
        async fn generate(&self, scores: &Dass21Scores) -> Result<Value, DomainError>;
    }
}

mockall::mock! {
    ScoreRepo {}

    #[async_trait]
    impl DassScoreRepository for ScoreRepo {
        async fn create(&self, record: &DassScoreRecord) -> Result<(), DomainError>;
    }
}

// Fixtures

struct Services {
    store: Arc<InMemoryDocumentStore>,
    ledger: Arc<ActivityLedgerService>,
    streak: Arc<DailyStreakService>,
    counter: Arc<CompletionCounterService>,
    repair: StreakRepairService,
    hydration: Arc<PlanHydrationService>,
}

fn services() -> Services {
    let store = Arc::new(InMemoryDocumentStore::new());
    let shared: Arc<dyn DocumentStore> = store.clone();

    let streak_repo = Arc::new(DocumentDailyStreakRepository::new(shared.clone()));
    let ledger = Arc::new(ActivityLedgerService::new(Arc::new(
        DocumentActivityCompletionRepository::new(shared.clone()),
    )));
    let counter = Arc::new(CompletionCounterService::new(Arc::new(
        DocumentCompletionCounterRepository::new(shared),
    )));

    Services {
        store,
        streak: Arc::new(DailyStreakService::new(streak_repo.clone())),
        repair: StreakRepairService::new(streak_repo, counter.clone()),
        hydration: Arc::new(PlanHydrationService::new(ledger.clone())),
        ledger,
        counter,
    }
}

fn alice() -> UserRef {
    UserRef::new(UserId::from_string("u-alice"), "Alice")
}

fn d(raw: &str) -> DateKey {
    DateKey::parse(raw).unwrap()
}

/// Streak with `last` awarded and `credits` completions banked.
async fn seed(s: &Services, last: &str, credits: u64) {
    s.streak.award_for_date(&alice(), d(last)).await.unwrap();
    if credits > 0 {
        s.counter
            .increment(&alice(), credits, d(last))
            .await
            .unwrap();
    }
}

// Ledger

#[tokio::test]
async fn test_record_completion_is_idempotent() {
    let s = services();

    let first = s
        .ledger
        .record_completion(&alice(), d("2025-06-01"), ActivitySlot::Morning)
        .await
        .unwrap();
    assert!(first.is_new);
    assert!(first.record.is_completed());

    let stored = s
        .ledger
        .get_slot_status(&alice().id, d("2025-06-01"), ActivitySlot::Morning)
        .await
        .unwrap()
        .record
        .unwrap();

    let second = s
        .ledger
        .record_completion(&alice(), d("2025-06-01"), ActivitySlot::Morning)
        .await
        .unwrap();
    assert!(!second.is_new);
    assert_eq!(second.record.completed_at(), stored.completed_at());
    assert_eq!(second.record.completed_at(), first.record.completed_at());
    assert_eq!(second.record.created_at(), first.record.created_at());
}

#[tokio::test]
async fn test_day_status_reports_each_slot() {
    let s = services();
    for slot in [ActivitySlot::Morning, ActivitySlot::Evening] {
        s.ledger
            .record_completion(&alice(), d("2025-06-01"), slot)
            .await
            .unwrap();
    }

    let day = s
        .ledger
        .get_day_status(&alice().id, d("2025-06-01"))
        .await
        .unwrap();

    assert!(day.flags.morning);
    assert!(!day.flags.afternoon);
    assert!(day.flags.evening);
    assert_eq!(day.records.len(), 2);
}

#[tokio::test]
async fn test_range_status_is_inclusive_and_rejects_inverted_range() {
    let s = services();
    for date in ["2025-01-01", "2025-01-02", "2025-01-04"] {
        s.ledger
            .record_completion(&alice(), d(date), ActivitySlot::Afternoon)
            .await
            .unwrap();
    }

    let records = s
        .ledger
        .get_range_status(&alice().id, d("2025-01-01"), d("2025-01-02"))
        .await
        .unwrap();
    let dates: Vec<String> = records.iter().map(|r| r.date().to_string()).collect();
    assert_eq!(dates, vec!["2025-01-01", "2025-01-02"]);

    let err = s
        .ledger
        .get_range_status(&alice().id, d("2025-01-04"), d("2025-01-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

// Daily streak

#[tokio::test]
async fn test_consecutive_days_extend_streak() {
    let s = services();

    for (date, expected) in [("2025-06-01", 1), ("2025-06-02", 2), ("2025-06-03", 3)] {
        let award = s.streak.award_for_date(&alice(), d(date)).await.unwrap();
        assert!(award.outcome.awarded);
        assert_eq!(award.outcome.current_streak, expected);
    }

    let same_day = s
        .streak
        .award_for_date(&alice(), d("2025-06-03"))
        .await
        .unwrap();
    assert!(!same_day.outcome.awarded);
    assert_eq!(same_day.outcome.current_streak, 3);
}

#[tokio::test]
async fn test_gap_resets_streak_but_keeps_longest() {
    let s = services();
    s.streak.award_for_date(&alice(), d("2025-06-01")).await.unwrap();
    s.streak.award_for_date(&alice(), d("2025-06-02")).await.unwrap();

    let award = s
        .streak
        .award_for_date(&alice(), d("2025-06-04"))
        .await
        .unwrap();

    assert!(award.outcome.awarded);
    assert_eq!(award.outcome.current_streak, 1);
    assert_eq!(award.outcome.last_awarded_date, Some(d("2025-06-04")));
    assert_eq!(award.streak.longest_streak(), 2);
}

#[tokio::test]
async fn test_get_for_user_without_record_is_not_persisted() {
    let s = services();

    let streak = s.streak.get_for_user(&alice()).await.unwrap();
    assert_eq!(streak.current_streak(), 0);
    assert_eq!(streak.last_awarded_date(), None);

    let counter = s.counter.get_for_user(&alice()).await.unwrap();
    assert_eq!(counter.total_completions(), 0);

    assert_eq!(s.store.count(&STREAKS).await, 0);
}

// Completion counter

#[tokio::test]
async fn test_spend_without_counter_is_not_found() {
    let s = services();

    let err = s.counter.spend(&alice(), 1).await.unwrap_err();
    match err {
        DomainError::NotFound(msg) => assert_eq!(msg, "No completion streak found for user"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_counter_never_goes_negative() {
    let s = services();
    s.counter.increment(&alice(), 4, d("2025-06-01")).await.unwrap();

    let err = s.counter.spend(&alice(), 5).await.unwrap_err();
    assert!(matches!(err, DomainError::InsufficientCredit(_)));

    let counter = s.counter.get_for_user(&alice()).await.unwrap();
    assert_eq!(counter.total_completions(), 4);
}

// Streak repair

#[tokio::test]
async fn test_repair_bridges_one_missed_day() {
    let s = services();
    seed(&s, "2025-06-01", 7).await;

    let streak = s.repair.repair(&alice(), d("2025-06-03")).await.unwrap();

    assert_eq!(streak.current_streak(), 2);
    assert_eq!(streak.last_awarded_date(), Some(d("2025-06-03")));
    let counter = s.counter.get_for_user(&alice()).await.unwrap();
    assert_eq!(counter.total_completions(), 2);
}

#[tokio::test]
async fn test_repair_rejects_two_day_gap_without_spending() {
    let s = services();
    seed(&s, "2025-06-01", 7).await;

    let err = s.repair.repair(&alice(), d("2025-06-04")).await.unwrap_err();
    match err {
        DomainError::IneligibleRepair(msg) => {
            assert_eq!(msg, "Repair allowed only for exactly one missed day gap")
        }
        other => panic!("expected IneligibleRepair, got {other:?}"),
    }

    let streak = s.streak.get_for_user(&alice()).await.unwrap();
    assert_eq!(streak.current_streak(), 1);
    assert_eq!(streak.last_awarded_date(), Some(d("2025-06-01")));
    let counter = s.counter.get_for_user(&alice()).await.unwrap();
    assert_eq!(counter.total_completions(), 7);
}

#[tokio::test]
async fn test_repair_with_four_credits_changes_nothing() {
    let s = services();
    seed(&s, "2025-06-01", 4).await;

    let err = s.repair.repair(&alice(), d("2025-06-03")).await.unwrap_err();
    assert_eq!(err.message(), "Insufficient totalCompletions to spend");

    let streak = s.streak.get_for_user(&alice()).await.unwrap();
    assert_eq!(streak.last_awarded_date(), Some(d("2025-06-01")));
    let counter = s.counter.get_for_user(&alice()).await.unwrap();
    assert_eq!(counter.total_completions(), 4);
}

#[tokio::test]
async fn test_repair_without_streak_is_ineligible() {
    let s = services();
    s.counter.increment(&alice(), 10, d("2025-06-01")).await.unwrap();

    let err = s.repair.repair(&alice(), d("2025-06-03")).await.unwrap_err();
    assert_eq!(err.message(), "No eligible streak to repair");
}

#[tokio::test]
async fn test_repair_without_counter_reports_missing_counter() {
    let s = services();
    seed(&s, "2025-06-01", 0).await;

    let err = s.repair.repair(&alice(), d("2025-06-03")).await.unwrap_err();
    assert_eq!(err.message(), "No completion streak found for user");
}

#[tokio::test]
async fn test_repair_refunds_when_streak_save_fails() {
    let s = services();
    seed(&s, "2025-06-01", 6).await;

    let shared: Arc<dyn DocumentStore> = s.store.clone();
    let repair = StreakRepairService::new(
        Arc::new(ReadOnlyStreakRepository {
            inner: DocumentDailyStreakRepository::new(shared),
        }),
        s.counter.clone(),
    );

    let err = repair.repair(&alice(), d("2025-06-03")).await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable(_)));

    let counter = s.counter.get_for_user(&alice()).await.unwrap();
    assert_eq!(counter.total_completions(), 6);
}

// Hydration

#[tokio::test]
async fn test_hydration_overlays_ledger_truth() {
    let s = services();
    s.ledger
        .record_completion(&alice(), d("2025-01-02"), ActivitySlot::Morning)
        .await
        .unwrap();

    let raw = json!({
        "activity_plan": [
            { "date": "2025-01-01", "Morning": { "activity": "Walk", "completed": true }, "Evening": { "activity": "Read" } },
            { "date": "2025-01-02", "Morning": { "activity": "Stretch" }, "Afternoon": { "activity": "Call a friend" } },
            { "date": "2025-01-03", "Morning": { "activity": "Breathe" }, "Evening": "Rest" }
        ]
    });

    let hydrated = s.hydration.hydrate(&alice().id, &raw).await.unwrap();
    let days = &hydrated["activity_plan"];

    assert_eq!(days[0]["Morning"]["completed"], json!(false));
    assert_eq!(days[0]["Evening"]["completed"], json!(false));
    assert_eq!(days[1]["Morning"]["completed"], json!(true));
    assert_eq!(days[1]["Afternoon"]["completed"], json!(false));
    assert_eq!(days[2]["Morning"]["completed"], json!(false));
    assert_eq!(days[2]["Evening"], json!("Rest"));
}

#[tokio::test]
async fn test_hydration_passes_unrecognized_plans_through() {
    let s = services();
    let raw = json!("| Day | Morning |\n| Mon | Walk |");

    let hydrated = s.hydration.hydrate(&alice().id, &raw).await.unwrap();
    assert_eq!(hydrated, raw);
}

// Store failures

#[tokio::test]
async fn test_store_unavailable_propagates() {
    let store: Arc<dyn DocumentStore> = Arc::new(UnavailableStore);
    let ledger = ActivityLedgerService::new(Arc::new(DocumentActivityCompletionRepository::new(
        store.clone(),
    )));
    let streak = DailyStreakService::new(Arc::new(DocumentDailyStreakRepository::new(store)));

    let err = ledger
        .record_completion(&alice(), d("2025-06-01"), ActivitySlot::Morning)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable(_)));
    assert!(err.is_recoverable());

    let err = streak.get_for_user(&alice()).await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable(_)));
}

// Plans

fn plan_service(generator: MockGenerator, score_repo: MockScoreRepo, s: &Services) -> PlanService {
    let shared: Arc<dyn DocumentStore> = s.store.clone();
    PlanService::new(
        Some(Arc::new(generator)),
        Arc::new(DocumentActivityPlanRepository::new(shared)),
        Arc::new(score_repo),
        s.hydration.clone(),
    )
}

#[tokio::test]
async fn test_generate_plan_survives_score_snapshot_failure() {
    let s = services();
    s.ledger
        .record_completion(&alice(), d("2025-06-01"), ActivitySlot::Evening)
        .await
        .unwrap();

    let mut generator = MockGenerator::new();
    generator.expect_generate().times(1).returning(|_| {
        Ok(json!({
            "activity_plan": [
                { "date": "2025-06-01", "Evening": { "activity": "Journal", "duration": "10 min" } }
            ]
        }))
    });
    let mut score_repo = MockScoreRepo::new();
    score_repo
        .expect_create()
        .times(1)
        .returning(|_| Err(DomainError::StoreUnavailable("dass_scores offline".to_string())));

    let plans = plan_service(generator, score_repo, &s);
    let scores = Dass21Scores::new(Some(10), Some(8), None).unwrap();

    let generated = plans.generate(&alice(), scores).await.unwrap();
    assert!(!generated.verified);
    assert_eq!(
        generated.plan["activity_plan"][0]["Evening"]["completed"],
        json!(true)
    );

    let latest = plans.get_latest_plan(&alice()).await.unwrap().unwrap();
    assert_eq!(latest.id, generated.id);
    assert_eq!(latest.scores, scores);
}

#[tokio::test]
async fn test_generator_failure_stores_nothing() {
    let s = services();

    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .returning(|_| Err(DomainError::ExternalService("upstream 503".to_string())));
    let mut score_repo = MockScoreRepo::new();
    score_repo.expect_create().times(0);

    let plans = plan_service(generator, score_repo, &s);
    let err = plans
        .generate(&alice(), Dass21Scores::default())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::ExternalService(_)));
    assert!(plans.get_latest_plan(&alice()).await.unwrap().is_none());
}

// Users

#[tokio::test]
async fn test_sign_in_creates_then_finds() {
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
    let users = UserService::new(Arc::new(DocumentUserRepository::new(store)));

    let first = users.sign_in_with_name("  Alice ").await.unwrap();
    assert!(first.is_new);
    assert_eq!(first.user.name(), "Alice");

    let again = users.sign_in_with_name("Alice").await.unwrap();
    assert!(!again.is_new);
    assert_eq!(again.user.id(), first.user.id());
    assert!(again.user.updated_at() >= first.user.updated_at());

    assert!(matches!(
        users.sign_in_with_name("   ").await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn test_sign_in_conflict_rereads_winner() {
    let winner = UserRecord::new("Alice", clock::now()).unwrap();
    let users = UserService::new(Arc::new(RacingUserRepository {
        winner: winner.clone(),
        lookups: tokio::sync::RwLock::new(0),
    }));

    let outcome = users.sign_in_with_name("Alice").await.unwrap();
    assert!(!outcome.is_new);
    assert_eq!(outcome.user.id(), winner.id());
}
