pub mod activity_completion_repo;
pub mod activity_plan_repo;
pub mod completion_counter_repo;
pub mod daily_streak_repo;
pub mod dass_score_repo;
pub mod user_repo;

pub use activity_completion_repo::DocumentActivityCompletionRepository;
pub use activity_plan_repo::DocumentActivityPlanRepository;
pub use completion_counter_repo::DocumentCompletionCounterRepository;
pub use daily_streak_repo::DocumentDailyStreakRepository;
pub use dass_score_repo::DocumentDassScoreRepository;
pub use user_repo::DocumentUserRepository;
