use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde_json::Value;
use taskboard_core::{
    storage::{StoreError, TaskStore},
    tasks::Task,
};
use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

/// Task store backed by a single pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TaskStore for JsonFileStore {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<Value>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no task document yet, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(storage_err(err)),
        };
        Ok(parse_document(&bytes))
    }

    #[instrument(skip_all, fields(path = %self.path.display(), count = tasks.len()))]
    async fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(tasks).map_err(storage_err)?;
        write_atomic(&self.path, &json)
    }
}

/// Malformed documents degrade to an empty collection.
fn parse_document(bytes: &[u8]) -> Vec<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Vec::new();
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Array(records)) => records,
        Ok(other) => {
            warn!(kind = json_kind(&other), "task document is not an array, ignoring it");
            Vec::new()
        }
        Err(err) => {
            warn!(%err, "task document is not valid JSON, ignoring it");
            Vec::new()
        }
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(storage_err)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(storage_err)?;
    tmp.write_all(bytes).map_err(storage_err)?;
    tmp.flush().map_err(storage_err)?;
    tmp.persist(path).map_err(|e| storage_err(e.error))?;
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn storage_err<E: ToString>(err: E) -> StoreError {
    StoreError::Storage {
        reason: err.to_string(),
    }
}
