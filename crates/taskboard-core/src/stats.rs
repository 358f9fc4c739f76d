use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::tasks::{is_overdue_at, Task, TaskStatus};

/// Completion summary for a collection. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub done: usize,
    pub overdue: usize,
    /// Share of done tasks in percent, rounded to one decimal.
    pub percent_done: f64,
}

/// Stats against the local wall clock.
pub fn aggregate(tasks: &[Task]) -> Stats {
    aggregate_at(tasks, Local::now().naive_local())
}

/// Totals, done count, completion percentage and overdue count at `now`.
pub fn aggregate_at(tasks: &[Task], now: NaiveDateTime) -> Stats {
    let total = tasks.len();
    let done = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .count();
    let overdue = tasks.iter().filter(|t| is_overdue_at(t, now)).count();
    Stats {
        total,
        done,
        overdue,
        percent_done: percent(done, total),
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}
