//! Test utilities for integration tests
use std::sync::Arc;

use axum::{Router, body::Body};

use mymost::api::{AppState, app};
use mymost::core::AppConfig;
use mymost::telegram::TelegramBot;
use mymost::telemost::TelemostClient;

/// Build a test app wired against mock upstream servers.
///
/// `telemost_url` of `None` simulates a conferencing client that failed
/// to construct at startup (e.g. missing token). The bot defaults to an
/// unconfigured one unless a token and base url are given.
pub fn test_app(telemost_url: Option<&str>, bot_url: Option<&str>) -> Router {
    let telemost = telemost_url.map(|url| {
        TelemostClient::new(Some("test-token".to_string()))
            .expect("Failed to construct client")
            .with_base_url(url)
    });
    // Empty-string token forces the unconfigured path regardless of the
    // environment the tests run in
    let bot = match bot_url {
        Some(url) => TelegramBot::new(Some("test-token".to_string())).with_base_url(url),
        None => TelegramBot::new(Some(String::new())),
    };
    let config = AppConfig {
        telemost_token: None,
        telegram_bot_token: None,
    };

    app(Arc::new(AppState::new(telemost, bot, config)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body was not utf-8")
}
