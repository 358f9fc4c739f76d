use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::tasks::{normalize_priority, normalize_status, Task};

/// Keys written by the older French-language board, checked when the
/// canonical key is absent.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("title", "titre"),
    ("priority", "priorité"),
    ("status", "statut"),
    ("created_date", "date_creation"),
    ("due_date", "date_limite"),
];

/// Legacy enumeration words and their canonical counterparts.
const LEGACY_VALUES: &[(&str, &str)] = &[
    ("basse", "low"),
    ("moyenne", "medium"),
    ("haute", "high"),
    ("à faire", "todo"),
    ("en cours", "in_progress"),
    ("terminée", "done"),
];

impl Task {
    /// Builds a task from an untrusted stored record, coercing every field.
    /// Returns `None` for values that are not JSON objects.
    pub fn from_record(value: &Value) -> Option<Task> {
        let record = value.as_object()?;
        Some(Task {
            id: coerce_id(field(record, "id")),
            title: coerce_text(field(record, "title")),
            description: coerce_text(field(record, "description")),
            priority: normalize_priority(&legacy_word(&coerce_text(field(record, "priority")))),
            status: normalize_status(&legacy_word(&coerce_text(field(record, "status")))),
            created_date: NaiveDate::parse_from_str(
                coerce_text(field(record, "created_date")).trim(),
                "%Y-%m-%d",
            )
            .ok(),
            due_date: coerce_text(field(record, "due_date")).trim().to_string(),
        })
    }
}

/// Coerces a whole stored document. Non-object entries are dropped.
pub fn tasks_from_records(records: &[Value]) -> Vec<Task> {
    records.iter().filter_map(Task::from_record).collect()
}

fn field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    record.get(key).or_else(|| {
        LEGACY_KEYS
            .iter()
            .find(|(canonical, _)| *canonical == key)
            .and_then(|(_, legacy)| record.get(*legacy))
    })
}

/// Stored ids above this are treated as damaged, like missing ones.
const MAX_STORED_ID: u64 = i64::MAX as u64;

/// Integer-truncating id coercion; anything unusable becomes `0`.
fn coerce_id(value: Option<&Value>) -> u64 {
    let id = match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().and_then(truncate)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    };
    id.filter(|id| *id <= MAX_STORED_ID).unwrap_or(0)
}

fn truncate(f: f64) -> Option<u64> {
    (0.0..=MAX_STORED_ID as f64)
        .contains(&f)
        .then(|| f.trunc() as u64)
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn legacy_word(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    LEGACY_VALUES
        .iter()
        .find(|(legacy, _)| *legacy == lowered)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(lowered)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tasks::{Priority, TaskStatus};

    #[test]
    fn coerces_canonical_record() {
        let task = Task::from_record(&json!({
            "id": 3,
            "title": "Write report",
            "description": "quarterly",
            "priority": "HIGH",
            "status": "in_progress",
            "created_date": "2024-05-01",
            "due_date": " 2024-05-10 ",
        }))
        .expect("object record");

        assert_eq!(task.id, 3);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.created_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(task.due_date, "2024-05-10");
    }

    #[test]
    fn invalid_fields_fall_back_to_defaults() {
        let task = Task::from_record(&json!({
            "id": "12",
            "title": 42,
            "priority": "critical",
            "status": null,
            "created_date": "yesterday",
        }))
        .expect("object record");

        assert_eq!(task.id, 12);
        assert_eq!(task.title, "42");
        assert_eq!(task.description, "");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.created_date, None);
        assert_eq!(task.due_date, "");
    }

    #[test]
    fn negative_or_missing_ids_become_zero() {
        let negative = Task::from_record(&json!({"id": -4, "title": "x"})).expect("record");
        let missing = Task::from_record(&json!({"title": "y"})).expect("record");
        assert_eq!(negative.id, 0);
        assert_eq!(missing.id, 0);
    }

    #[test]
    fn fractional_ids_truncate() {
        for raw in [json!(3.0), json!(3.9), json!("3.5"), json!(" 3 ")] {
            let task = Task::from_record(&json!({"id": raw, "title": "x"})).expect("record");
            assert_eq!(task.id, 3, "id {raw}");
        }
    }

    #[test]
    fn out_of_range_ids_become_zero() {
        for raw in [json!(u64::MAX), json!(1e300), json!("NaN"), json!(-0.5)] {
            let task = Task::from_record(&json!({"id": raw, "title": "x"})).expect("record");
            assert_eq!(task.id, 0, "id {raw}");
        }
        let edge = Task::from_record(&json!({"id": i64::MAX})).expect("record");
        assert_eq!(edge.id, i64::MAX as u64);
    }

    #[test]
    fn reads_legacy_french_records() {
        let task = Task::from_record(&json!({
            "id": 1,
            "titre": "Réviser",
            "description": "",
            "priorité": "haute",
            "statut": "terminée",
            "date_creation": "2023-11-02",
            "date_limite": "2023-11-30",
        }))
        .expect("object record");

        assert_eq!(task.title, "Réviser");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.created_date, NaiveDate::from_ymd_opt(2023, 11, 2));
        assert_eq!(task.due_date, "2023-11-30");
    }

    #[test]
    fn skips_non_object_entries() {
        let records = vec![json!(1), json!({"id": 2, "title": "kept"}), json!("text")];
        let tasks = tasks_from_records(&records);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 2);
    }
}
