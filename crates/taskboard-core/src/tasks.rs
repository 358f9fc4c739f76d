use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// Accepted deadline formats, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Task priority. Unknown input collapses to `Medium`.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status lifecycle. Unknown input collapses to `Todo`.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Next state on the `todo -> in_progress -> done -> todo` ring.
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task entity as persisted in the board document.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Set once at creation. `None` only for stored records whose date was lost.
    #[serde(serialize_with = "serialize_date_or_empty")]
    pub created_date: Option<NaiveDate>,
    /// Deadline as entered; empty means no deadline.
    pub due_date: String,
}

impl Task {
    /// Parsed deadline, if the stored text is a valid calendar date.
    pub fn deadline(&self) -> Option<NaiveDate> {
        parse_due_date(&self.due_date)
    }
}

/// Trimmed, lowercased `input` if it names a priority, else `Medium`.
pub fn normalize_priority(input: &str) -> Priority {
    let input = input.trim().to_lowercase();
    Priority::ALL
        .into_iter()
        .find(|p| p.as_str() == input)
        .unwrap_or_default()
}

/// Trimmed, lowercased `input` if it names a status, else `Todo`.
pub fn normalize_status(input: &str) -> TaskStatus {
    let input = input.trim().to_lowercase();
    TaskStatus::ALL
        .into_iter()
        .find(|s| s.as_str() == input)
        .unwrap_or_default()
}

/// Normalizes `current` and steps it once around the status ring.
pub fn advance_status(current: &str) -> TaskStatus {
    normalize_status(current).next()
}

/// Parses a deadline entered as `YYYY-MM-DD` (or `YYYY/MM/DD`).
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Overdue against the local wall clock.
pub fn is_overdue(task: &Task) -> bool {
    is_overdue_at(task, Local::now().naive_local())
}

/// A task is overdue when it is not done and `now` is past 23:59:59 of its
/// deadline. Missing or unparseable deadlines never make a task overdue.
pub fn is_overdue_at(task: &Task, now: NaiveDateTime) -> bool {
    if task.status == TaskStatus::Done {
        return false;
    }
    task.deadline()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .is_some_and(|end_of_day| now > end_of_day)
}

/// Writes `Option<NaiveDate>` as `YYYY-MM-DD` or an empty string.
fn serialize_date_or_empty<S: Serializer>(
    date: &Option<NaiveDate>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => s.serialize_str(&date.format("%Y-%m-%d").to_string()),
        None => s.serialize_str(""),
    }
}
