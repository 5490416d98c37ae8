use std::env;

/// Process-wide configuration, read from the environment once at
/// startup. Both tokens are optional here: a missing Telemost token
/// degrades the meeting routes (the health check reports it) and a
/// missing bot token switches invitation sends to simulation mode.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub telemost_token: Option<String>,
    pub telegram_bot_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let telemost_token = env::var("YANDEX_OAUTH_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        Self {
            telemost_token,
            telegram_bot_token,
        }
    }
}
