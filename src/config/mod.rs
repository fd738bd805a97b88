//! Configuration loading for gocov-tree

mod schema;

pub use schema::{
    CliOverrides, Config, Staging, DEFAULT_DOWNLOAD_PATH, DEFAULT_OUTPUT, DEFAULT_SCRATCH_DIR,
    DEFAULT_STRIP_PREFIX, DEFAULT_TITLE,
};

use crate::error::BeautifyError;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".gocovtreerc.json";

/// Find and load the config file. An explicit path must exist; otherwise the
/// current directory and its parents are searched.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config, BeautifyError> {
    let path = match custom_path {
        Some(p) => {
            let path = if p.is_absolute() {
                p.to_path_buf()
            } else {
                work_dir.join(p)
            };
            if !path.exists() {
                return Err(BeautifyError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path)
        }
        None => find_config_in_parents(work_dir),
    };

    match path {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}

fn read_config(path: &Path) -> Result<Config, BeautifyError> {
    tracing::debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(path).map_err(|e| {
        BeautifyError::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        BeautifyError::Config(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

/// Search for .gocovtreerc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Default config file contents written by `gocov-tree init`
pub fn default_config_json() -> String {
    // Serializing a plain struct of strings/bools/paths cannot fail
    serde_json::to_string_pretty(&Config::default()).unwrap_or_else(|_| "{}".to_string())
}
