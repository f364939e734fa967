mod aggregate;
mod repository;
mod value_objects;


pub use aggregate::ActivityCompletion;
pub use repository::ActivityCompletionRepository;
pub use value_objects::{ActivitySlot, SlotFlags};
