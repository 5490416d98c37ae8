//! Telegram Bot API client used to deliver meeting invitations.
//!
//! A missing bot token is a supported configuration: the bot stays in a
//! degraded mode where bulk sends are simulated as successful without
//! any network traffic, so deployments without notification
//! infrastructure still work.

pub mod models;
pub use models::{BotStatus, Contact, MeetingInfo, SendReport};

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use thiserror::Error;

const BASE_URL: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of error messages kept in a bulk send report.
const MAX_REPORTED_ERRORS: usize = 5;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("bot token not configured")]
    NotConfigured,

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct TelegramBot {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl TelegramBot {
    /// Create a bot with the given token, falling back to the
    /// `TELEGRAM_BOT_TOKEN` environment variable. A missing token is
    /// not an error, it enables the simulation mode.
    pub fn new(bot_token: Option<String>) -> Self {
        let token = bot_token
            .or_else(|| env::var("TELEGRAM_BOT_TOKEN").ok())
            .filter(|t| !t.is_empty());
        if token.is_none() {
            tracing::warn!("TELEGRAM_BOT_TOKEN is not set, invitation sends will be simulated");
        }

        Self {
            http: Client::new(),
            base_url: BASE_URL.to_string(),
            token,
        }
    }

    /// Point the bot at a different API host. Used by tests to talk to
    /// a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Call one Bot API method and unwrap the `{ok, result|description}`
    /// envelope.
    async fn call(&self, method: &str, data: Value) -> Result<Value, BotError> {
        let token = self.token.as_ref().ok_or(BotError::NotConfigured)?;
        let url = format!("{}/bot{}/{}", self.base_url, token, method);

        let response = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&data)
            .send()
            .await?;
        let envelope: Value = response.json().await?;

        if envelope.get("ok").and_then(Value::as_bool) != Some(true) {
            let description = envelope
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(BotError::Api(description.to_string()));
        }

        Ok(envelope.get("result").cloned().unwrap_or_else(|| json!({})))
    }

    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<Value, BotError> {
        tracing::info!("Sending message to {}", chat_id);
        self.call(
            "sendMessage",
            json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            }),
        )
        .await
    }

    /// Send one invitation, formatted from the meeting data unless the
    /// caller supplied a custom message.
    pub async fn send_meeting_invitation(
        &self,
        chat_id: &str,
        meeting: &MeetingInfo,
        custom_message: Option<&str>,
    ) -> Result<Value, BotError> {
        let text = match custom_message {
            Some(message) => message.to_string(),
            None => invitation_text(meeting),
        };
        self.send_message(chat_id, &text).await
    }

    pub async fn get_me(&self) -> Result<Value, BotError> {
        self.call("getMe", json!({})).await
    }

    /// Probe the bot. Never errors, failures fold into the `error`
    /// status variant.
    pub async fn check_status(&self) -> BotStatus {
        if !self.is_configured() {
            return BotStatus::NotConfigured {
                message: "Bot token not configured".to_string(),
            };
        }
        match self.get_me().await {
            Ok(bot_info) => BotStatus::Active { bot_info },
            Err(e) => BotStatus::Error {
                message: e.to_string(),
            },
        }
    }

    /// Send the invitation to every contact, in input order.
    ///
    /// Without a token this reports all contacts as sent with
    /// `simulated: true` and makes zero network calls. Otherwise sends
    /// are sequential and one contact's failure never aborts the rest.
    pub async fn send_bulk_invitations(
        &self,
        contacts: &[Contact],
        meeting: &MeetingInfo,
        custom_message: Option<&str>,
    ) -> SendReport {
        if !self.is_configured() {
            tracing::warn!(
                "Bot token not configured, simulating send to {} contacts",
                contacts.len()
            );
            return SendReport {
                success: true,
                sent_count: contacts.len(),
                failed_count: 0,
                errors: Vec::new(),
                simulated: true,
            };
        }

        let mut sent_count = 0;
        let mut failed_count = 0;
        let mut errors = Vec::new();

        for contact in contacts {
            let label = contact.name.clone().unwrap_or_else(|| "unknown".to_string());
            let Some(chat_id) = contact.chat_id() else {
                tracing::warn!("No chat id for contact {}", label);
                failed_count += 1;
                continue;
            };

            match self
                .send_meeting_invitation(&chat_id, meeting, custom_message)
                .await
            {
                Ok(_) => {
                    sent_count += 1;
                    tracing::info!("Invitation sent to {}", label);
                }
                Err(e) => {
                    tracing::error!("Failed to send to {}: {}", label, e);
                    failed_count += 1;
                    if errors.len() < MAX_REPORTED_ERRORS {
                        errors.push(e.to_string());
                    }
                }
            }
        }

        SendReport {
            success: sent_count > 0,
            sent_count,
            failed_count,
            errors,
            simulated: false,
        }
    }
}

fn invitation_text(meeting: &MeetingInfo) -> String {
    let title = meeting.title.as_deref().unwrap_or("Telemost meeting");

    let mut text = String::from("🎥 <b>Meeting invitation</b>\n\n");
    text.push_str(&format!("📋 <b>Title:</b> {title}\n"));
    if let Some(description) = meeting.description.as_deref().filter(|d| !d.is_empty()) {
        text.push_str(&format!("📝 <b>Description:</b> {description}\n"));
    }
    text.push_str(&format!("\n🔗 <b>Join link:</b>\n{}\n", meeting.join_url));
    text.push_str("\n💡 Click the link to join the meeting");
    text
}
