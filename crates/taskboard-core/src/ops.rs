use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::tasks::{normalize_priority, parse_due_date, Task, TaskStatus};

/// User input rejected by `create`. Messages are shown to the user as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error("invalid deadline: {raw:?} (expected YYYY-MM-DD)")]
    InvalidDeadline { raw: String },
    #[error("no task id left above {max}")]
    IdsExhausted { max: u64 },
}

/// No task carries the requested id.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no task with id {id}")]
pub struct NotFound {
    pub id: u64,
}

/// Raw form input for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub due_date: String,
}

/// One past the highest id in the collection; `1` when empty.
/// Saturates at `u64::MAX`; `create` refuses to hand that out twice.
pub fn next_id(tasks: &[Task]) -> u64 {
    max_id(tasks).saturating_add(1)
}

fn max_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| t.id).max().unwrap_or(0)
}

/// Validates `input` and appends a fresh `todo` task created today.
pub fn create(tasks: &mut Vec<Task>, input: NewTask) -> Result<Task, ValidationError> {
    create_on(tasks, input, Local::now().date_naive())
}

/// `create` with an explicit creation date.
pub fn create_on(
    tasks: &mut Vec<Task>,
    input: NewTask,
    today: NaiveDate,
) -> Result<Task, ValidationError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let due_date = input.due_date.trim();
    if !due_date.is_empty() && parse_due_date(due_date).is_none() {
        return Err(ValidationError::InvalidDeadline {
            raw: due_date.to_string(),
        });
    }

    let max = max_id(tasks);
    let id = max
        .checked_add(1)
        .ok_or(ValidationError::IdsExhausted { max })?;

    let task = Task {
        id,
        title: title.to_string(),
        description: input.description.trim().to_string(),
        priority: normalize_priority(&input.priority),
        status: TaskStatus::Todo,
        created_date: Some(today),
        due_date: due_date.to_string(),
    };
    tasks.push(task.clone());
    Ok(task)
}

/// Steps the first task with `id` once around the status ring.
/// Id `0` marks a damaged stored record and never matches.
pub fn advance(tasks: &mut [Task], id: u64) -> Result<&Task, NotFound> {
    let task = tasks
        .iter_mut()
        .find(|t| id != 0 && t.id == id)
        .ok_or(NotFound { id })?;
    task.status = task.status.next();
    Ok(task)
}

/// Drops every task with `id`; unknown ids and id `0` leave the collection
/// untouched.
pub fn delete(tasks: Vec<Task>, id: u64) -> Vec<Task> {
    if id == 0 {
        return tasks;
    }
    tasks.into_iter().filter(|t| t.id != id).collect()
}
