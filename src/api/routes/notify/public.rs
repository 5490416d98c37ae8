//! Public types for the notification API

use serde::{Deserialize, Serialize};

use crate::telegram::{Contact, MeetingInfo};

/// Request body for sending a meeting link to contacts
#[derive(Debug, Deserialize)]
pub struct SendMeetingRequest {
    pub meeting_data: Option<MeetingInfo>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    pub custom_message: Option<String>,
}

/// Response for a bulk invitation send
#[derive(Debug, Serialize)]
pub struct SendMeetingResponse {
    pub success: bool,
    pub sent_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_count: Option<usize>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}
