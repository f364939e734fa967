mod award_flame_handler;
mod complete_activity_handler;
mod complete_day_handler;
mod generate_plan_handler;
mod repair_streak_handler;
mod sign_in_handler;


pub use award_flame_handler::AwardFlameCommandHandler;
pub use complete_activity_handler::CompleteActivityCommandHandler;
pub use complete_day_handler::CompleteDayCommandHandler;
pub use generate_plan_handler::GeneratePlanCommandHandler;
pub use repair_streak_handler::RepairStreakCommandHandler;
pub use sign_in_handler::SignInCommandHandler;
