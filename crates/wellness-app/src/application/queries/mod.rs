mod activity_queries;
mod plan_queries;
mod streak_queries;

pub use activity_queries::ActivityQueryService;
pub use plan_queries::PlanQueryService;
pub use streak_queries::StreakQueryService;
