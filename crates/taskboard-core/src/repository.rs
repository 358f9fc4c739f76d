use async_trait::async_trait;
use thiserror::Error;

use crate::{
    ops::{NewTask, NotFound, ValidationError},
    query::TaskQuery,
    stats::Stats,
    storage::StoreError,
    tasks::Task,
};

/// Failures surfaced by repository operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a board render needs: the filtered tasks and stats over the whole
/// collection.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub tasks: Vec<Task>,
    pub stats: Stats,
}

/// Repository contract: every call loads the full collection and persists
/// it again when mutated.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, RepoError>;
    async fn view(&self, query: &TaskQuery) -> Result<BoardView, RepoError>;
    async fn create(&self, input: NewTask) -> Result<Task, RepoError>;
    async fn advance(&self, id: u64) -> Result<Task, RepoError>;
    /// Returns whether anything was removed.
    async fn delete(&self, id: u64) -> Result<bool, RepoError>;
}
