// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod activity;
pub mod completion_counter;
pub mod dass;
pub mod plan;
pub mod shared;
pub mod streak;
pub mod user;

// Re-exports for convenience
pub use shared::{DateKey, DomainError, UserId, UserRef};
