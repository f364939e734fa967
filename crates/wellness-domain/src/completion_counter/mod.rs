mod aggregate;
mod repository;

pub use aggregate::CompletionCounter;
pub use repository::CompletionCounterRepository;
