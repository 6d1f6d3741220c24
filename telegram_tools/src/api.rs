use std::sync::Arc;

use log::*;
use reqwest::Client;
use serde_json::json;

use crate::{config::TelegramConfig, error::TelegramApiError};

/// What became of a delivery attempt. `Skipped` is a first-class outcome, not an error: running
/// without a bot token is a supported configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Skipped,
}

#[derive(Clone)]
pub struct TelegramApi {
    config: TelegramConfig,
    client: Arc<Client>,
}

impl TelegramApi {
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramApiError> {
        let client = Client::builder().build().map_err(|e| TelegramApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn is_configured(&self) -> bool {
        self.config.bot_token.is_some()
    }

    pub fn support_contact(&self) -> Option<&str> {
        self.config.support_contact.as_deref()
    }

    /// Delivers a Markdown message to the given chat. Without a configured token this is a
    /// logged no-op.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<Delivery, TelegramApiError> {
        let Some(token) = &self.config.bot_token else {
            warn!("📨️ No bot token configured, skipping notification to {chat_id}");
            return Ok(Delivery::Skipped);
        };
        let url = format!("{}/bot{}/sendMessage", self.config.api_base, token.reveal());
        let body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });
        let response =
            self.client.post(&url).json(&body).send().await.map_err(|e| TelegramApiError::Transport(e.to_string()))?;
        if response.status().is_success() {
            trace!("📨️ sendMessage delivered to {chat_id}");
            Ok(Delivery::Sent)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| TelegramApiError::Transport(e.to_string()))?;
            Err(TelegramApiError::QueryError { status, message })
        }
    }
}
