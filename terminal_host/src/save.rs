//! Save provider
//!
//! Writes a pretty-printed JSON snapshot of the shell state for the `save`
//! command.

use chrono::{DateTime, Utc};
use fs_tree::FileSystem;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Everything the `save` command persists
#[derive(Debug, Serialize)]
pub struct SaveSnapshot<'a> {
    pub saved_at: DateTime<Utc>,
    /// Absolute path of the current directory
    pub current_directory: String,
    /// Active output colour name, if one was chosen
    pub color: Option<&'a str>,
    pub file_system: &'a FileSystem,
}

/// Serializes `snapshot` to `path`, replacing any existing file
pub fn save_snapshot(path: &Path, snapshot: &SaveSnapshot<'_>) -> Result<(), SaveError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    log::info!("saved snapshot to {}", path.display());
    Ok(())
}

/// Save error types
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
