mod aggregate;
mod repository;


pub use aggregate::{AwardOutcome, DailyStreak, REPAIR_COST};
pub use repository::DailyStreakRepository;
