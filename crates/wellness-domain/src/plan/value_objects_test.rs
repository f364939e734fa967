#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::collections::HashSet;

    use crate::activity::ActivitySlot;
    use crate::plan::{ActivityPlan, PlanRow, SlotEntry};
    use crate::shared::DateKey;

    fn key(raw: &str) -> DateKey {
        DateKey::parse(raw).unwrap()
    }

    fn three_day_plan() -> serde_json::Value {
        json!({
            "activity_plan": [
                { "date": "2025-01-01", "Morning": { "activity": "Walk" }, "Evening": { "activity": "Journal" } },
                { "date": "2025-01-02", "Morning": { "activity": "Stretch", "completed": true } },
                { "date": "2025-01-03", "Afternoon": { "activity": "Read" } }
            ],
            "label": "Calm week"
        })
    }

    #[test]
    fn test_normalize_reads_day_list_and_keeps_unknown_fields() {
        let plan = ActivityPlan::normalize(&three_day_plan()).unwrap();

        assert_eq!(plan.days().count(), 3);
        assert_eq!(plan.extra.get("label"), Some(&json!("Calm week")));
        assert_eq!(plan.date_range(), Some((key("2025-01-01"), key("2025-01-03"))));
    }

    #[test]
    fn test_normalize_accepts_alternate_spellings() {
        let raw = json!({
            "activityPlan": [
                { "dateKey": "2025-02-01", "morning": { "title": "Yoga", "selfTalk": "I can", "duration_minutes": 15 } }
            ]
        });

        let plan = ActivityPlan::normalize(&raw).unwrap();
        let day = plan.days().next().unwrap();
        let SlotEntry::Activity(activity) = &day.morning else {
            panic!("morning should be an activity");
        };

        assert_eq!(day.date, key("2025-02-01"));
        assert_eq!(activity.activity.as_deref(), Some("Yoga"));
        assert_eq!(activity.self_talk.as_deref(), Some("I can"));
        assert_eq!(activity.duration, Some(json!(15)));

        let canonical = plan.to_value().unwrap();
        assert_eq!(canonical["activity_plan"][0]["date"], json!("2025-02-01"));
        assert_eq!(canonical["activity_plan"][0]["Morning"]["activity"], json!("Yoga"));
    }

    #[test]
    fn test_normalize_rejects_unrecognizable_shapes() {
        assert!(ActivityPlan::normalize(&json!("just text")).is_none());
        assert!(ActivityPlan::normalize(&json!({ "activity_plan": [] })).is_none());
        assert!(ActivityPlan::normalize(&json!({ "something": [1, 2] })).is_none());
        assert!(ActivityPlan::normalize(&json!({ "days": [{ "note": "no date" }] })).is_none());
    }

    #[test]
    fn test_rows_without_valid_date_pass_through() {
        let raw = json!({
            "days": [
                { "date": "2025-01-01", "Morning": { "activity": "Walk" } },
                { "date": "someday", "Morning": { "activity": "Nap", "completed": true } },
                "rest day"
            ]
        });

        let mut plan = ActivityPlan::normalize(&raw).unwrap();
        plan.apply_completions(&HashSet::new());

        assert!(matches!(plan.activity_plan[1], PlanRow::Opaque(_)));
        let value = plan.to_value().unwrap();
        assert_eq!(value["activity_plan"][1]["Morning"]["completed"], json!(true));
        assert_eq!(value["activity_plan"][2], json!("rest day"));
    }

    #[test]
    fn test_apply_completions_overlays_ledger_truth() {
        let mut plan = ActivityPlan::normalize(&three_day_plan()).unwrap();
        let completed = HashSet::from([(key("2025-01-01"), ActivitySlot::Morning)]);

        plan.apply_completions(&completed);
        let value = plan.to_value().unwrap();
        let days = &value["activity_plan"];

        assert_eq!(days[0]["Morning"]["completed"], json!(true));
        assert_eq!(days[0]["Evening"]["completed"], json!(false));
        // stored flag is ignored in favour of the ledger
        assert_eq!(days[1]["Morning"]["completed"], json!(false));
        assert_eq!(days[2]["Afternoon"]["completed"], json!(false));
        assert!(days[2].get("Morning").is_none());
    }

    #[test]
    fn test_non_object_slots_are_left_unchanged() {
        let raw = json!({
            "activity_plan": [
                { "date": "2025-01-01", "Morning": "Free time", "Evening": null }
            ]
        });

        let mut plan = ActivityPlan::normalize(&raw).unwrap();
        plan.apply_completions(&HashSet::from([(key("2025-01-01"), ActivitySlot::Morning)]));

        let day = plan.days().next().unwrap();
        assert_eq!(day.morning, SlotEntry::Opaque(json!("Free time")));
        assert_eq!(day.evening, SlotEntry::Opaque(json!(null)));

        let value = plan.to_value().unwrap();
        assert_eq!(value["activity_plan"][0]["Morning"], json!("Free time"));
    }

    #[test]
    fn test_stale_completion_aliases_do_not_survive_hydration() {
        let raw = json!({
            "activity_plan": [
                { "date": "2025-01-01", "Morning": { "activity": "Walk", "completed": false, "done": true, "isCompleted": true } }
            ]
        });

        let mut plan = ActivityPlan::normalize(&raw).unwrap();
        plan.apply_completions(&HashSet::new());

        let morning = &plan.to_value().unwrap()["activity_plan"][0]["Morning"];
        assert_eq!(morning, &json!({ "activity": "Walk", "completed": false }));
    }

    #[test]
    fn test_duplicate_slot_spellings_collapse_to_one_slot() {
        let raw = json!({
            "activity_plan": [
                {
                    "date": "2025-01-01",
                    "Morning": { "activity": "Walk" },
                    "morning": { "activity": "Run", "completed": true }
                }
            ]
        });

        let mut plan = ActivityPlan::normalize(&raw).unwrap();
        plan.apply_completions(&HashSet::new());

        let day = &plan.to_value().unwrap()["activity_plan"][0];
        assert!(day.get("morning").is_none());
        assert_eq!(day["Morning"], json!({ "activity": "Walk", "completed": false }));
    }

    #[test]
    fn test_non_string_fields_pass_through_untouched() {
        let raw = json!({
            "activity_plan": [
                {
                    "date": "2025-01-01",
                    "Evening": {
                        "activity": { "kind": "breathing", "rounds": 4 },
                        "description": null,
                        "duration": 15
                    }
                }
            ]
        });

        let plan = ActivityPlan::normalize(&raw).unwrap();
        let day = plan.days().next().unwrap();
        let SlotEntry::Activity(evening) = &day.evening else {
            panic!("evening should be an activity");
        };
        assert_eq!(evening.activity, None);
        assert_eq!(evening.duration, Some(json!(15)));

        let value = plan.to_value().unwrap();
        let evening = &value["activity_plan"][0]["Evening"];
        assert_eq!(evening["activity"], json!({ "kind": "breathing", "rounds": 4 }));
        assert_eq!(evening.get("description"), Some(&json!(null)));
        assert_eq!(evening["duration"], json!(15));
        assert_eq!(evening["completed"], json!(false));
    }
}
