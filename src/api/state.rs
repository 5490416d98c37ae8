use crate::core::AppConfig;
use crate::telegram::TelegramBot;
use crate::telemost::TelemostClient;

/// Shared, read-only application state injected into every route.
pub struct AppState {
    // None when client construction failed at startup (e.g. missing
    // token). Routes check the handle instead of crashing the process.
    pub telemost: Option<TelemostClient>,
    pub bot: TelegramBot,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(telemost: Option<TelemostClient>, bot: TelegramBot, config: AppConfig) -> Self {
        Self {
            telemost,
            bot,
            config,
        }
    }
}
