use std::{env, path::PathBuf};

use crate::config::Config;
use color_eyre::Result;
use dirs::data_dir;
use taskboard_storage::json_file_store::JsonFileStore;
use tracing::debug;

/// Environment override for the task document, taking precedence over config.
pub const DATA_FILE_ENV: &str = "TASKBOARD_DATA_FILE";

/// Resolve the default task document location.
pub fn default_data_file() -> Result<PathBuf> {
    let base = data_dir().ok_or_else(|| color_eyre::eyre::eyre!("no data dir available"))?;
    Ok(base.join("taskboard").join("tasks.json"))
}

/// Pick the task document: env override, then config, then the platform default.
pub fn resolve_data_file(config: &Config, env_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = env_override.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }
    if let Some(path) = &config.data_file {
        return Ok(path.clone());
    }
    default_data_file()
}

/// Build the JSON store for the configured document.
pub fn store_from_config(config: &Config) -> Result<JsonFileStore> {
    let path = resolve_data_file(config, env::var_os(DATA_FILE_ENV).map(PathBuf::from))?;
    debug!(path = %path.display(), "using task document");
    Ok(JsonFileStore::new(path))
}

/// Scratch store next to the real document, used by the health check.
pub fn probe_store(store: &JsonFileStore) -> JsonFileStore {
    let dir = store
        .path()
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    JsonFileStore::new(dir.join(".taskboard-health.json"))
}
