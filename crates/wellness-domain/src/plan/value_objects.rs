use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::activity::ActivitySlot;
use crate::shared::{DateKey, DomainError};

/// Typed view of a generated 7-day plan.
///
/// Built once from loosely shaped JSON by [`ActivityPlan::normalize`]; fields
/// the schema does not know about are carried through in `extra` maps so that
/// nothing the generator produced is lost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPlan {
    pub(crate) activity_plan: Vec<PlanRow>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// One entry of the day list. Rows without a usable date key are kept
/// verbatim and never touched by hydration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlanRow {
    Day(PlanDay),
    Opaque(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanDay {
    pub date: DateKey,
    #[serde(rename = "Morning", skip_serializing_if = "SlotEntry::is_missing")]
    pub morning: SlotEntry,
    #[serde(rename = "Afternoon", skip_serializing_if = "SlotEntry::is_missing")]
    pub afternoon: SlotEntry,
    #[serde(rename = "Evening", skip_serializing_if = "SlotEntry::is_missing")]
    pub evening: SlotEntry,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What a day holds for one slot. Non-object values (plain strings, nulls,
/// arrays) are opaque and pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SlotEntry {
    Missing,
    Activity(PlanActivity),
    Opaque(Value),
}

impl SlotEntry {
    pub fn is_missing(&self) -> bool {
        matches!(self, SlotEntry::Missing)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PlanActivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_talk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlanDay {
    pub fn slot_mut(&mut self, slot: ActivitySlot) -> &mut SlotEntry {
        match slot {
            ActivitySlot::Morning => &mut self.morning,
            ActivitySlot::Afternoon => &mut self.afternoon,
            ActivitySlot::Evening => &mut self.evening,
        }
    }
}

impl ActivityPlan {
    pub fn days(&self) -> impl Iterator<Item = &PlanDay> {
        self.activity_plan.iter().filter_map(|row| match row {
            PlanRow::Day(day) => Some(day),
            PlanRow::Opaque(_) => None,
        })
    }

    /// Earliest and latest dated day, or `None` if no row carries a date.
    pub fn date_range(&self) -> Option<(DateKey, DateKey)> {
        let mut dates = self.days().map(|d| d.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Overwrite every activity's `completed` flag with ledger truth: true
    /// exactly when `(date, slot)` is in `completed`.
    pub fn apply_completions(&mut self, completed: &HashSet<(DateKey, ActivitySlot)>) {
        for row in &mut self.activity_plan {
            let PlanRow::Day(day) = row else { continue };
            let date = day.date;
            for slot in ActivitySlot::ALL {
                if let SlotEntry::Activity(activity) = day.slot_mut(slot) {
                    activity.completed = completed.contains(&(date, slot));
                }
            }
        }
    }

    pub fn to_value(&self) -> Result<Value, DomainError> {
        serde_json::to_value(self).map_err(|e| DomainError::Serialization(e.to_string()))
    }
}
