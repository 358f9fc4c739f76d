use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::tasks::Task;

/// Errors produced by task store implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Underlying storage failure.
    #[error("storage failure: {reason}")]
    Storage { reason: String },
}

/// Whole-collection persistence for the board document.
///
/// `load` hands back raw records so callers coerce them before use; a
/// missing or malformed document loads as an empty collection. `save`
/// replaces the entire document, keeping the given order.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Value>, StoreError>;

    async fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

/// In-memory store for tests and smoke runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskStore {
    inner: Arc<Mutex<Vec<Value>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw records, as if read from disk.
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(records)),
        }
    }

    /// Snapshot of what is currently stored.
    pub fn records(&self) -> Result<Vec<Value>, StoreError> {
        let records = self.inner.lock().map_err(poisoned)?;
        Ok(records.clone())
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn load(&self) -> Result<Vec<Value>, StoreError> {
        self.records()
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let records = tasks
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| StoreError::Storage {
                reason: err.to_string(),
            })?;
        *self.inner.lock().map_err(poisoned)? = records;
        Ok(())
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Storage {
        reason: format!("lock poisoned: {err}"),
    }
}
