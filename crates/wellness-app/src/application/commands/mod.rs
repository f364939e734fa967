pub mod activity_commands;
pub mod command_handler;
pub mod handlers;
pub mod plan_commands;
pub mod streak_commands;
pub mod user_commands;

pub use activity_commands::*;
pub use command_handler::{Command, CommandHandler};
pub use plan_commands::*;
pub use streak_commands::*;
pub use user_commands::*;
