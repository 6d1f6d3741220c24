use log::*;
use sg_common::Secret;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// The bot credential. When absent, every delivery is skipped silently; notifications are
    /// best-effort and a missing token must never fail the payment flow.
    pub bot_token: Option<Secret<String>>,
    /// Base URL of the Bot API. Overridable so tests can point at a local stub.
    pub api_base: String,
    /// Support handle appended to notification footers, e.g. "@my_support_bot".
    pub support_contact: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self { bot_token: None, api_base: DEFAULT_API_BASE.to_string(), support_contact: None }
    }
}

impl TelegramConfig {
    pub fn new_from_env_or_default() -> Self {
        let bot_token = std::env::var("SG_TELEGRAM_BOT_TOKEN").ok().filter(|t| !t.is_empty()).map(Secret::new);
        if bot_token.is_none() {
            warn!("📨️ SG_TELEGRAM_BOT_TOKEN is not set. Payment notifications will be skipped.");
        }
        let api_base = std::env::var("SG_TELEGRAM_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let support_contact = std::env::var("SG_SUPPORT_CONTACT").ok().filter(|s| !s.is_empty());
        Self { bot_token, api_base, support_contact }
    }

    pub fn with_token<S: Into<String>>(token: S) -> Self {
        Self { bot_token: Some(Secret::new(token.into())), ..Self::default() }
    }
}
