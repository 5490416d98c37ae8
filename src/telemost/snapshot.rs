//! Flat-file snapshots of meeting payloads.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;

use super::error::TelemostError;

/// Filename derived from the meeting id and the current local time.
fn default_filename(meeting: &Value) -> PathBuf {
    let id = meeting
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("meeting_{id}_{timestamp}.json"))
}

/// Write a meeting payload to a pretty-printed JSON file and return the
/// path. When no filename is given one is derived from the meeting id.
pub fn save_meeting_data(
    meeting: &Value,
    filename: Option<&Path>,
) -> Result<PathBuf, TelemostError> {
    let path = match filename {
        Some(path) => path.to_path_buf(),
        None => default_filename(meeting),
    };

    let content = serde_json::to_string_pretty(meeting)
        .map_err(|e| TelemostError::Api(format!("failed to serialize meeting data: {e}")))?;
    fs::write(&path, content)
        .map_err(|e| TelemostError::Api(format!("failed to write {}: {e}", path.display())))?;

    tracing::info!("Meeting data saved to {}", path.display());
    Ok(path)
}
