use chrono::Duration;
use serde_json::json;
use std::sync::Arc;

use wellness_domain::activity::{ActivityCompletion, ActivityCompletionRepository, ActivitySlot};
use wellness_domain::completion_counter::{CompletionCounter, CompletionCounterRepository};
use wellness_domain::dass::{Dass21Scores, DassScoreRecord, DassScoreRepository};
use wellness_domain::plan::{ActivityPlanRecord, ActivityPlanRepository};
use wellness_domain::shared::{clock, DateKey, DocumentStore, DomainError};
use wellness_domain::streak::{DailyStreak, DailyStreakRepository};
use wellness_domain::user::{UserRecord, UserRepository};
use wellness_infrastructure::persistence::containers::{ACTIVITY_COMPLETIONS, DASS_SCORES, STREAKS};
use wellness_infrastructure::persistence::repositories::{
    DocumentActivityCompletionRepository, DocumentActivityPlanRepository,
    DocumentCompletionCounterRepository, DocumentDailyStreakRepository,
    DocumentDassScoreRepository, DocumentUserRepository,
};
use wellness_infrastructure::persistence::InMemoryDocumentStore;

mod test_helpers;

fn key(raw: &str) -> DateKey {
    DateKey::parse(raw).expect("valid date key")
}

#[tokio::test]
async fn completion_repo_upsert_find_and_range() {
    let store = test_helpers::sqlite_store().await;
    let repo = DocumentActivityCompletionRepository::new(store.clone());
    let plans = DocumentActivityPlanRepository::new(store.clone());
    let user = test_helpers::alice();
    let now = clock::now();

    for (date, slot) in [
        ("2025-01-01", ActivitySlot::Morning),
        ("2025-01-02", ActivitySlot::Morning),
        ("2025-01-02", ActivitySlot::Evening),
        ("2025-01-05", ActivitySlot::Afternoon),
    ] {
        let record = ActivityCompletion::completed_now(&user, key(date), slot, now);
        repo.upsert(&record).await.expect("upsert completion");
    }

    // a plan in the same container must not leak into ledger queries
    let plan = ActivityPlanRecord::new(&user, json!({ "activity_plan": [] }), Dass21Scores::default(), now);
    plans.create(&plan).await.expect("create plan");

    let found = repo
        .find(&user.id, &key("2025-01-02"), ActivitySlot::Evening)
        .await
        .expect("find")
        .expect("should exist");
    assert!(found.is_completed());
    assert_eq!(found.id(), "u-alice:2025-01-02:Evening");

    let missing = repo
        .find(&user.id, &key("2025-01-02"), ActivitySlot::Afternoon)
        .await
        .expect("find missing");
    assert!(missing.is_none());

    let day = repo.find_by_day(&user.id, &key("2025-01-02")).await.expect("by day");
    assert_eq!(day.len(), 2);

    let range = repo
        .find_in_range(&user.id, &key("2025-01-01"), &key("2025-01-03"))
        .await
        .expect("range");
    assert_eq!(range.len(), 3);
    assert!(range.iter().all(|r| r.date() <= key("2025-01-03")));
}

#[tokio::test]
async fn completion_repo_upsert_replaces_existing_document() {
    let store = test_helpers::sqlite_store().await;
    let repo = DocumentActivityCompletionRepository::new(store.clone());
    let user = test_helpers::alice();
    let first = clock::now();

    let record = ActivityCompletion::completed_now(&user, key("2025-06-01"), ActivitySlot::Morning, first);
    repo.upsert(&record).await.expect("first upsert");
    repo.upsert(&record).await.expect("second upsert");

    let docs = store
        .query(&ACTIVITY_COMPLETIONS, &Default::default())
        .await
        .expect("query all");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["slot"], "Morning");
    assert_eq!(docs[0]["date"], "2025-06-01");
    assert_eq!(docs[0]["userId"], "u-alice");
}

#[tokio::test]
async fn streak_repo_round_trips_and_reads_legacy_documents() {
    let store = test_helpers::sqlite_store().await;
    let repo = DocumentDailyStreakRepository::new(store.clone());
    let user = test_helpers::alice();
    let now = clock::now();

    let mut streak = DailyStreak::start(&user, key("2025-06-01"), now);
    streak.award(key("2025-06-02"), "Alice", now);
    repo.upsert(&streak).await.expect("save streak");

    let loaded = repo
        .find_by_user_id(&user.id)
        .await
        .expect("find")
        .expect("should exist");
    assert_eq!(loaded.current_streak(), 2);
    assert_eq!(loaded.longest_streak(), 2);
    assert_eq!(loaded.last_awarded_date(), Some(key("2025-06-02")));

    // documents written before longestStreak existed
    store
        .create(
            &STREAKS,
            json!({
                "id": "u-bob",
                "userId": "u-bob",
                "userName": "Bob",
                "currentStreak": 3,
                "lastAwardedDate": "2025-05-30",
                "createdAt": "2025-05-28T08:00:00Z",
                "updatedAt": "2025-05-30T08:00:00Z"
            }),
        )
        .await
        .expect("seed legacy");

    let bob = repo
        .find_by_user_id(&wellness_domain::UserId::from_string("u-bob"))
        .await
        .expect("find bob")
        .expect("bob exists");
    assert_eq!(bob.current_streak(), 3);
    assert_eq!(bob.longest_streak(), 3);
}

#[tokio::test]
async fn counter_repo_shares_container_with_streaks() {
    let store = test_helpers::sqlite_store().await;
    let streaks = DocumentDailyStreakRepository::new(store.clone());
    let counters = DocumentCompletionCounterRepository::new(store.clone());
    let user = test_helpers::alice();
    let now = clock::now();

    streaks
        .upsert(&DailyStreak::start(&user, key("2025-06-01"), now))
        .await
        .expect("save streak");

    let mut counter = CompletionCounter::start(&user, 1, now);
    counter.increment(6, "Alice", now + Duration::minutes(1));
    counters.upsert(&counter).await.expect("save counter");

    let loaded = counters
        .find_by_user_id(&user.id)
        .await
        .expect("find counter")
        .expect("counter exists");
    assert_eq!(loaded.total_completions(), 7);

    let raw = store
        .get(&STREAKS, "u-alice:completion_streak", "u-alice")
        .await
        .expect("raw counter doc");
    assert_eq!(raw["type"], "completion_streak");
    assert_eq!(raw["totalCompletions"], 7);

    assert!(streaks.find_by_user_id(&user.id).await.expect("find streak").is_some());
}

#[tokio::test]
async fn plan_repo_returns_latest_plan() {
    let store = test_helpers::sqlite_store().await;
    let repo = DocumentActivityPlanRepository::new(store);
    let user = test_helpers::alice();
    let earlier = clock::now() - Duration::days(2);
    let later = clock::now();

    assert!(repo.find_latest_by_user_id(&user.id).await.expect("empty").is_none());

    let scores = Dass21Scores::new(Some(5), Some(6), Some(7)).expect("scores");
    let old = ActivityPlanRecord::new(&user, json!({ "label": "old" }), scores, earlier);
    let new = ActivityPlanRecord::new(&user, json!({ "label": "new" }), scores, later);
    repo.create(&new).await.expect("create new");
    repo.create(&old).await.expect("create old");

    let latest = repo
        .find_latest_by_user_id(&user.id)
        .await
        .expect("find latest")
        .expect("plan exists");
    assert_eq!(latest.plan()["label"], "new");
    assert!(latest.is_verified());
    assert_eq!(latest.scores(), &scores);
}

#[tokio::test]
async fn dass_score_repo_writes_flat_snapshot() {
    let store = test_helpers::sqlite_store().await;
    let repo = DocumentDassScoreRepository::new(store.clone());
    let user = test_helpers::alice();

    let scores = Dass21Scores::new(Some(4), None, Some(9)).expect("scores");
    let record = DassScoreRecord::new(&user, scores, clock::now());
    repo.create(&record).await.expect("create snapshot");

    let doc = store
        .get(&DASS_SCORES, record.id().as_str(), "u-alice")
        .await
        .expect("snapshot doc");
    assert_eq!(doc["depression"], 4);
    assert_eq!(doc["stress"], 9);
    assert!(doc.get("anxiety").is_none());
    assert_eq!(doc["total"], 13);
}

#[tokio::test]
async fn user_repo_enforces_unique_names() {
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
    let repo = DocumentUserRepository::new(store);
    let now = clock::now();

    let alice = UserRecord::new("Alice", now).expect("user");
    repo.create(&alice).await.expect("create alice");

    let clash = UserRecord::new("Alice", now).expect("user");
    let err = repo.create(&clash).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let mut found = repo
        .find_by_name("Alice")
        .await
        .expect("find")
        .expect("alice exists");
    assert_eq!(found.id(), alice.id());

    found.touch(now + Duration::minutes(5));
    repo.save(&found).await.expect("save touched");
    let reloaded = repo.find_by_name("Alice").await.expect("find").expect("exists");
    assert_eq!(reloaded.updated_at(), now + Duration::minutes(5));
}
