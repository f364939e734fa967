//! Boundary normalization from generator/stored JSON into [`ActivityPlan`].
//!
//! Generators are inconsistent about key casing and naming, so every
//! alternative spelling is resolved here and nowhere else.

use serde_json::{Map, Value};

use super::value_objects::{ActivityPlan, PlanActivity, PlanDay, PlanRow, SlotEntry};
use crate::activity::ActivitySlot;
use crate::shared::DateKey;

const DAY_LIST_KEYS: &[&str] = &["activity_plan", "activityPlan", "days", "plan"];
const DATE_KEYS: &[&str] = &["date", "dateKey", "day_date"];
const TITLE_KEYS: &[&str] = &["activity", "title", "name"];
const DESCRIPTION_KEYS: &[&str] = &["description", "details", "instructions"];
const SELF_TALK_KEYS: &[&str] = &["self_talk", "selfTalk"];
const DURATION_KEYS: &[&str] = &["duration", "duration_minutes", "durationMinutes"];
const COMPLETED_KEYS: &[&str] = &["completed", "done", "isCompleted"];

fn slot_keys(slot: ActivitySlot) -> &'static [&'static str] {
    match slot {
        ActivitySlot::Morning => &["Morning", "morning", "MORNING"],
        ActivitySlot::Afternoon => &["Afternoon", "afternoon", "AFTERNOON"],
        ActivitySlot::Evening => &["Evening", "evening", "EVENING"],
    }
}

/// Remove the first present alias from `map`, returning its value.
fn take_first(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    let key = keys.iter().find(|k| map.contains_key(**k))?;
    map.remove(*key)
}

/// Remove every alias from `map`, returning the value of the first present
/// one. Later spellings are stale copies and must not survive into `extra`.
fn take_all(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    let value = take_first(map, keys);
    for key in keys {
        map.remove(*key);
    }
    value
}

/// Take the first present alias only when it holds a string. Anything else
/// stays in `map` and passes through untouched.
fn take_text(map: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    let key = keys.iter().find(|k| map.contains_key(**k))?;
    if !map.get(*key)?.is_string() {
        return None;
    }
    match map.remove(*key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

impl ActivityPlan {
    /// Build the typed plan from arbitrary JSON.
    ///
    /// Returns `None` when the value has no recognizable non-empty day list
    /// or when none of the rows carries a valid date; callers then treat the
    /// plan as opaque.
    pub fn normalize(value: &Value) -> Option<Self> {
        let mut root = value.as_object()?.clone();
        let list = match take_first(&mut root, DAY_LIST_KEYS)? {
            Value::Array(items) if !items.is_empty() => items,
            _ => return None,
        };

        let rows: Vec<PlanRow> = list.into_iter().map(normalize_row).collect();
        if !rows.iter().any(|r| matches!(r, PlanRow::Day(_))) {
            return None;
        }

        Some(Self {
            activity_plan: rows,
            extra: root,
        })
    }
}

fn normalize_row(raw: Value) -> PlanRow {
    let Value::Object(mut map) = raw else {
        return PlanRow::Opaque(raw);
    };

    let date_key = DATE_KEYS.iter().find(|k| map.contains_key(**k)).copied();
    let date = date_key
        .and_then(|k| map.get(k))
        .and_then(Value::as_str)
        .and_then(|s| DateKey::parse(s).ok());

    let (Some(date_key), Some(date)) = (date_key, date) else {
        return PlanRow::Opaque(Value::Object(map));
    };
    map.remove(date_key);

    let mut take_slot = |slot| match take_all(&mut map, slot_keys(slot)) {
        None => SlotEntry::Missing,
        Some(Value::Object(activity)) => SlotEntry::Activity(normalize_activity(activity)),
        Some(other) => SlotEntry::Opaque(other),
    };
    let morning = take_slot(ActivitySlot::Morning);
    let afternoon = take_slot(ActivitySlot::Afternoon);
    let evening = take_slot(ActivitySlot::Evening);

    PlanRow::Day(PlanDay {
        date,
        morning,
        afternoon,
        evening,
        extra: map,
    })
}

fn normalize_activity(mut map: Map<String, Value>) -> PlanActivity {
    let completed = matches!(take_all(&mut map, COMPLETED_KEYS), Some(Value::Bool(true)));
    PlanActivity {
        activity: take_text(&mut map, TITLE_KEYS),
        description: take_text(&mut map, DESCRIPTION_KEYS),
        self_talk: take_text(&mut map, SELF_TALK_KEYS),
        duration: take_first(&mut map, DURATION_KEYS),
        completed,
        extra: map,
    }
}
