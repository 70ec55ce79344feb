//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Nothing in this crate reads environment variables; the binaries
//! collect overrides and hand them to the resolver functions below.

use crate::constants::{CREDENTIALS_FILENAME, DEFAULT_DATA_DIR, SNAPSHOT_FILENAME};
use crate::severity::SeverityTable;
use crate::{TriageError, TriageResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    severity_table: Arc<SeverityTable>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if `data_dir` is not an existing directory.
    pub fn new(data_dir: PathBuf, severity_table: SeverityTable) -> TriageResult<Self> {
        if !data_dir.is_dir() {
            return Err(TriageError::InvalidInput(format!(
                "data directory {} does not exist or is not a directory",
                data_dir.display()
            )));
        }

        Ok(Self {
            data_dir,
            severity_table: Arc::new(severity_table),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join(CREDENTIALS_FILENAME)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILENAME)
    }

    pub fn severity_table(&self) -> Arc<SeverityTable> {
        Arc::clone(&self.severity_table)
    }
}

/// Resolve the data directory, creating it if it does not exist yet.
///
/// If `override_dir` is `None` the working directory is used, which is where the
/// credential and snapshot files have always lived.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> TriageResult<PathBuf> {
    let dir = override_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    if dir.exists() && !dir.is_dir() {
        return Err(TriageError::InvalidInput(format!(
            "data directory {} is not a directory",
            dir.display()
        )));
    }

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            TriageError::InvalidInput(format!(
                "failed to create data directory {}: {e}",
                dir.display()
            ))
        })?;
        tracing::info!("created data directory {}", dir.display());
    }

    Ok(dir)
}

/// Load the severity table from an optional file path.
///
/// `None` gives the built-in table.
pub fn severity_table_from_path(path: Option<&Path>) -> TriageResult<SeverityTable> {
    match path {
        Some(path) => SeverityTable::load_yaml(path),
        None => Ok(SeverityTable::default()),
    }
}

/// Load the severity table from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns the built-in table.
pub fn severity_table_from_env_value(value: Option<String>) -> TriageResult<SeverityTable> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    severity_table_from_path(value.as_deref().map(Path::new))
}

/// Parse the data directory from an optional environment value.
///
/// Empty or whitespace-only values count as unset.
pub fn data_dir_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
