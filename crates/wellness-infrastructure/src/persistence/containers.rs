//! Container layout of the document store.

use wellness_domain::shared::ContainerSpec;

/// Completion records, and generated plans (`type = "activity_plan"`).
pub const ACTIVITY_COMPLETIONS: ContainerSpec =
    ContainerSpec::new("activity_completions", "/userId");

/// Daily streak documents and completion counters (`type = "completion_streak"`).
pub const STREAKS: ContainerSpec = ContainerSpec::new("streaks", "/userId");

pub const DASS_SCORES: ContainerSpec = ContainerSpec::new("dass_scores", "/userId");

pub const USERS: ContainerSpec = ContainerSpec::new("users", "/name").with_unique_keys(&["/name"]);

pub const ACTIVITY_PLAN_TYPE: &str = "activity_plan";
pub const ACTIVITY_COMPLETION_TYPE: &str = "activity_completion";
pub const DAILY_STREAK_TYPE: &str = "daily_streak";
pub const COMPLETION_STREAK_TYPE: &str = "completion_streak";
