//! Telegram chat notifier.
//!
//! One `sendMessage` call per submission through the Bot API.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ChatNotifier;
use intake_core::config::TelegramSettings;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build Telegram HTTP client")?;
        Ok(Self {
            client,
            bot_token: settings.bot_token.clone(),
            chat_id: settings.chat_id.clone(),
            api_base: TELEGRAM_API_BASE.to_string(),
        })
    }

    /// Point the notifier at a different API base (test servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait]
impl ChatNotifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Telegram sendMessage request failed")?;

        let status = response.status();
        let body: SendMessageResponse = response
            .json()
            .await
            .with_context(|| format!("Telegram sendMessage returned malformed body ({})", status))?;

        if !status.is_success() || !body.ok {
            return Err(anyhow!(
                "Telegram sendMessage rejected ({}): {}",
                status,
                body.description.unwrap_or_else(|| "no description".to_string())
            ));
        }

        tracing::info!(chat_id = %self.chat_id, "Telegram notification sent");
        Ok(())
    }
}
