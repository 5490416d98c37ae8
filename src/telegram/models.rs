//! Types used by the invitation bot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A contact the caller wants to notify. Used for delivery only, never
/// persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    pub name: Option<String>,
    pub username: Option<String>,
    // Telegram chat ids show up as numbers or strings depending on the
    // caller, accept both.
    pub id: Option<Value>,
}

impl Contact {
    /// Destination chat id: the username (with a leading `@` stripped)
    /// wins, the raw id is the fallback. `None` means the contact is
    /// unreachable and counts as failed.
    pub fn chat_id(&self) -> Option<String> {
        if let Some(username) = &self.username {
            let trimmed = username.trim_start_matches('@');
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        match &self.id {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// The subset of a meeting payload the invitation template uses.
#[derive(Debug, Clone, Deserialize)]
pub struct MeetingInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub join_url: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Aggregate result of a bulk send. `success` is true iff at least one
/// send succeeded; only the first 5 error messages are retained.
#[derive(Debug, Serialize)]
pub struct SendReport {
    pub success: bool,
    pub sent_count: usize,
    pub failed_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub simulated: bool,
}

/// Result of probing the bot, as returned by the bot-status route.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BotStatus {
    Active { bot_info: Value },
    NotConfigured { message: String },
    Error { message: String },
}
