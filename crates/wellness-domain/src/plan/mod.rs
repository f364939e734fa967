mod aggregate;
mod normalize;
mod repository;
mod value_objects;

pub use aggregate::ActivityPlanRecord;
pub use repository::{ActivityPlanRepository, PlanGenerator};
pub use value_objects::{ActivityPlan, PlanActivity, PlanDay, PlanRow, SlotEntry};

#[cfg(test)]
mod value_objects_test;
