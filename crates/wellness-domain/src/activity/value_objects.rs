use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// One of the three fixed daily buckets an activity can be completed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivitySlot {
    Morning,
    Afternoon,
    Evening,
}

impl ActivitySlot {
    /// All slots in the order they occur during a day.
    pub const ALL: [ActivitySlot; 3] = [
        ActivitySlot::Morning,
        ActivitySlot::Afternoon,
        ActivitySlot::Evening,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivitySlot::Morning => "Morning",
            ActivitySlot::Afternoon => "Afternoon",
            ActivitySlot::Evening => "Evening",
        }
    }
}

impl fmt::Display for ActivitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivitySlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(ActivitySlot::Morning),
            "afternoon" => Ok(ActivitySlot::Afternoon),
            "evening" => Ok(ActivitySlot::Evening),
            _ => Err(DomainError::Validation(format!(
                "Invalid slot '{}'; expected Morning, Afternoon or Evening",
                s
            ))),
        }
    }
}

/// Completion flags of all three slots for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFlags {
    pub morning: bool,
    pub afternoon: bool,
    pub evening: bool,
}

impl SlotFlags {
    pub fn get(&self, slot: ActivitySlot) -> bool {
        match slot {
            ActivitySlot::Morning => self.morning,
            ActivitySlot::Afternoon => self.afternoon,
            ActivitySlot::Evening => self.evening,
        }
    }

    pub fn set(&mut self, slot: ActivitySlot, value: bool) {
        match slot {
            ActivitySlot::Morning => self.morning = value,
            ActivitySlot::Afternoon => self.afternoon = value,
            ActivitySlot::Evening => self.evening = value,
        }
    }

    pub fn completed_count(&self) -> usize {
        ActivitySlot::ALL.iter().filter(|s| self.get(**s)).count()
    }
}
