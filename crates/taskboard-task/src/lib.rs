use std::sync::Arc;

use async_trait::async_trait;
use taskboard_core::{
    ops::{self, NewTask},
    query::TaskQuery,
    record::tasks_from_records,
    repository::{BoardView, RepoError, TaskRepository},
    stats,
    storage::TaskStore,
    tasks::Task,
};
use tracing::{debug, info, instrument};

/// Task repository over any `TaskStore`: load everything, apply one
/// mutation, write everything back.
pub struct StoreTaskRepo<S: TaskStore> {
    store: Arc<S>,
}

impl<S: TaskStore> StoreTaskRepo<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    async fn load(&self) -> Result<Vec<Task>, RepoError> {
        let records = self.store.load().await?;
        let tasks = tasks_from_records(&records);
        if tasks.len() != records.len() {
            debug!(
                skipped = records.len() - tasks.len(),
                "dropped non-object records"
            );
        }
        Ok(tasks)
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), RepoError> {
        Ok(self.store.save(tasks).await?)
    }
}

#[async_trait]
impl<S: TaskStore> TaskRepository for StoreTaskRepo<S> {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Task>, RepoError> {
        self.load().await
    }

    #[instrument(skip(self))]
    async fn view(&self, query: &TaskQuery) -> Result<BoardView, RepoError> {
        let tasks = self.load().await?;
        Ok(BoardView {
            stats: stats::aggregate(&tasks),
            tasks: query.apply(&tasks),
        })
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: NewTask) -> Result<Task, RepoError> {
        let mut tasks = self.load().await?;
        let task = ops::create(&mut tasks, input)?;
        self.save(&tasks).await?;
        info!(id = task.id, "task created");
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn advance(&self, id: u64) -> Result<Task, RepoError> {
        let mut tasks = self.load().await?;
        let updated = ops::advance(&mut tasks, id)?.clone();
        self.save(&tasks).await?;
        info!(id, status = %updated.status, "task advanced");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: u64) -> Result<bool, RepoError> {
        let tasks = self.load().await?;
        let before = tasks.len();
        let remaining = ops::delete(tasks, id);
        if remaining.len() == before {
            debug!(id, "nothing to delete");
            return Ok(false);
        }
        self.save(&remaining).await?;
        info!(id, "task deleted");
        Ok(true)
    }
}
