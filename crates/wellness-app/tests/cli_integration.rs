use std::collections::HashMap;
use std::path::Path;

use wellness_app::presentation::bootstrap::{build_app_state, StoreBackend};
use wellness_app::presentation::cli::{CliCommand, UserArg};
use wellness_app::presentation::commands::execute;
use wellness_app::presentation::state::AppState;
use wellness_infrastructure::config::AppConfig;

fn config_for(dir: &Path) -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        (
            "WELLNESS_DB_PATH",
            dir.join("data").join("wellness.db").display().to_string(),
        ),
        ("WELLNESS_LOG_DIR", dir.join("logs").display().to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn user(name: &str) -> UserArg {
    UserArg {
        user: name.to_string(),
    }
}

fn complete(name: &str, date: &str, slot: &str) -> CliCommand {
    CliCommand::Complete {
        user: user(name),
        date: date.to_string(),
        slot: slot.to_string(),
    }
}

async fn sqlite_state(dir: &Path) -> AppState {
    build_app_state(&config_for(dir), StoreBackend::Sqlite)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_streak_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = sqlite_state(dir.path()).await;
        for (date, slot) in [("2025-06-01", "Morning"), ("2025-06-02", "Evening")] {
            let result = execute(&state, complete("Alice", date, slot)).await.unwrap();
            assert_eq!(result["changed"], true);
        }
    }

    let state = sqlite_state(dir.path()).await;
    let summary = execute(&state, CliCommand::Streak { user: user("Alice") })
        .await
        .unwrap();

    assert_eq!(summary["userName"], "Alice");
    assert_eq!(summary["streak"]["currentStreak"], 2);
    assert_eq!(summary["streak"]["longestStreak"], 2);
    assert_eq!(summary["streak"]["lastAwardedDate"], "2025-06-02");
    assert_eq!(summary["activityStreak"]["totalCompletions"], 2);
}

#[tokio::test]
async fn test_sign_in_is_stable_across_commands() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;

    let first = execute(
        &state,
        CliCommand::SignIn {
            name: " Alice ".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(first["isNew"], true);
    assert_eq!(first["user"]["name"], "Alice");

    let completed = execute(&state, complete("Alice", "2025-06-01", "Morning"))
        .await
        .unwrap();
    assert_eq!(completed["completion"]["userId"], first["user"]["id"]);

    let again = execute(
        &state,
        CliCommand::SignIn {
            name: "Alice".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(again["isNew"], false);
    assert_eq!(again["user"]["id"], first["user"]["id"]);
}

#[tokio::test]
async fn test_repair_then_range_status() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;

    execute(
        &state,
        CliCommand::CompleteDay {
            user: user("Bob"),
            date: "2025-06-01".to_string(),
            slots: vec![
                "Morning".to_string(),
                "Afternoon".to_string(),
                "Evening".to_string(),
            ],
        },
    )
    .await
    .unwrap();
    execute(
        &state,
        CliCommand::CompleteDay {
            user: user("Bob"),
            date: "2025-06-02".to_string(),
            slots: vec!["Morning".to_string(), "Evening".to_string()],
        },
    )
    .await
    .unwrap();

    let repaired = execute(
        &state,
        CliCommand::Repair {
            user: user("Bob"),
            date: "2025-06-04".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(repaired["streak"]["currentStreak"], 3);
    assert_eq!(repaired["activityStreak"]["totalCompletions"], 0);

    let again = execute(
        &state,
        CliCommand::Repair {
            user: user("Bob"),
            date: "2025-06-06".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(again.code, 3001);
    assert_eq!(again.message, "Insufficient totalCompletions to spend");

    let range = execute(
        &state,
        CliCommand::RangeStatus {
            user: user("Bob"),
            start: "2025-06-01".to_string(),
            end: "2025-06-04".to_string(),
        },
    )
    .await
    .unwrap();
    let dates: Vec<&str> = range
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2025-06-01", "2025-06-01", "2025-06-01", "2025-06-02", "2025-06-02"]
    );
}

#[tokio::test]
async fn test_slot_status_for_untouched_slot() {
    let state = build_app_state(
        &config_for(tempfile::tempdir().unwrap().path()),
        StoreBackend::InMemory,
    )
    .await
    .unwrap();

    let status = execute(
        &state,
        CliCommand::SlotStatus {
            user: user("Carol"),
            date: "2025-06-01".to_string(),
            slot: "Afternoon".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(status["completed"], false);
    assert!(status["completion"].is_null());
}
