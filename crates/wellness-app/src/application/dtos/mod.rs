mod activity_dto;
mod plan_dto;
mod streak_dto;
mod user_dto;

pub use activity_dto::*;
pub use plan_dto::*;
pub use streak_dto::*;
pub use user_dto::*;
