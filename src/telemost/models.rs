//! Input types and validation rules shared by the client operations.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::TelemostError;

/// Waiting room levels accepted by the provider.
pub const WAITING_ROOM_LEVELS: &[&str] = &["PUBLIC", "ORGANIZATION", "ADMINS"];

/// Access levels accepted for a live stream.
pub const STREAM_ACCESS_LEVELS: &[&str] = &["PUBLIC", "ORGANIZATION"];

/// Provider limit on co-hosts per meeting.
pub const MAX_COHOSTS: usize = 30;

pub const MAX_STREAM_TITLE_CHARS: usize = 1024;
pub const MAX_STREAM_DESCRIPTION_CHARS: usize = 2048;

/// Every Telemost join link starts with this prefix.
pub const JOIN_URL_PREFIX: &str = "https://telemost.yandex.ru/";

/// Live stream parameters attached to a meeting. All fields are
/// optional and absent fields are omitted from the request body rather
/// than sent as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveStream {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,
}

impl LiveStream {
    pub fn validate(&self) -> Result<(), TelemostError> {
        if let Some(title) = &self.title
            && title.chars().count() > MAX_STREAM_TITLE_CHARS
        {
            return Err(TelemostError::Validation(format!(
                "stream title must be at most {MAX_STREAM_TITLE_CHARS} characters"
            )));
        }
        if let Some(description) = &self.description
            && description.chars().count() > MAX_STREAM_DESCRIPTION_CHARS
        {
            return Err(TelemostError::Validation(format!(
                "stream description must be at most {MAX_STREAM_DESCRIPTION_CHARS} characters"
            )));
        }
        if let Some(access_level) = &self.access_level {
            validate_access_level(access_level)?;
        }
        Ok(())
    }
}

/// A meeting co-organizer, identified by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cohost {
    pub email: String,
}

impl Cohost {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
        }
    }
}

/// RFC-lite email check, mirrors the provider's own leniency.
pub fn validate_email(email: &str) -> bool {
    let pattern = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    pattern.is_match(email)
}

pub fn validate_waiting_room_level(level: &str) -> Result<(), TelemostError> {
    if WAITING_ROOM_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(TelemostError::Validation(format!(
            "invalid waiting room level: {level}"
        )))
    }
}

pub fn validate_access_level(level: &str) -> Result<(), TelemostError> {
    if STREAM_ACCESS_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(TelemostError::Validation(format!(
            "invalid stream access level: {level}"
        )))
    }
}

pub fn validate_cohosts(cohosts: &[Cohost]) -> Result<(), TelemostError> {
    if cohosts.len() > MAX_COHOSTS {
        return Err(TelemostError::Validation(format!(
            "at most {MAX_COHOSTS} cohosts are allowed"
        )));
    }
    for cohost in cohosts {
        if !validate_email(&cohost.email) {
            return Err(TelemostError::Validation(format!(
                "invalid email: {}",
                cohost.email
            )));
        }
    }
    Ok(())
}

/// Truncate to a maximum number of characters. Counting chars rather
/// than bytes keeps multi-byte input from being split mid-codepoint.
pub fn clamp_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Sanity check a provider meeting payload before handing it to
/// downstream consumers: the id must be present and the join link must
/// point at Telemost.
pub fn validate_meeting_data(meeting: &Value) -> Result<(), TelemostError> {
    for field in ["id", "join_url"] {
        if meeting.get(field).is_none() {
            return Err(TelemostError::Validation(format!(
                "missing required field: {field}"
            )));
        }
    }
    let join_url = meeting.get("join_url").and_then(Value::as_str).unwrap_or("");
    if !join_url.starts_with(JOIN_URL_PREFIX) {
        return Err(TelemostError::Validation(
            "invalid meeting join link".to_string(),
        ));
    }
    Ok(())
}
