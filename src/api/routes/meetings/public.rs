//! Public types for the meetings API

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::telemost::{Cohost, LiveStream};

fn default_waiting_room_level() -> String {
    "PUBLIC".to_string()
}

fn default_limit() -> u32 {
    50
}

/// Request body for creating a meeting. `title` and `description` are
/// local metadata echoed back in the response, they are not sent to the
/// provider.
#[derive(Debug, Deserialize)]
pub struct CreateMeetingRequest {
    #[serde(default = "default_waiting_room_level")]
    pub waiting_room_level: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub live_stream: Option<LiveStream>,
    pub cohosts: Option<Vec<Cohost>>,
}

/// Response for a created meeting: provider-assigned fields plus the
/// echoed caller metadata.
#[derive(Debug, Serialize)]
pub struct CreateMeetingResponse {
    pub id: Option<Value>,
    pub join_url: Option<Value>,
    pub waiting_room_level: Option<Value>,
    pub created_at: Option<Value>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_stream: Option<Value>,
}

/// Query parameters for listing meetings
#[derive(Debug, Deserialize)]
pub struct ListMeetingsQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

/// Request body for a partial meeting update
#[derive(Debug, Deserialize)]
pub struct UpdateMeetingRequest {
    pub waiting_room_level: Option<String>,
    pub live_stream: Option<LiveStream>,
}
