//! Telegram Bot API notifier

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::io::HttpClient;
use crate::notifier::Notifier;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Sends messages to a fixed chat through the Telegram Bot API
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

// The bot token stays out of Debug output.
impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        Self {
            token: config.telegram_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
            http,
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", TELEGRAM_API_URL, self.token)
    }

    /// Strip the bot token out of text destined for errors and logs.
    ///
    /// The token is part of the request URL, so transport errors would
    /// otherwise carry it into failure reports.
    fn redact(&self, text: &str) -> String {
        if self.token.is_empty() {
            return text.to_string();
        }
        text.replace(&self.token, "<token>")
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> crate::Result<()> {
        tracing::info!("Sending message to chat {}", self.chat_id);
        let url = self.send_message_url();
        let params = [("chat_id", self.chat_id.as_str()), ("text", text)];
        let response = self
            .http
            .post_form(&url, &params)
            .await
            .map_err(|e| crate::BotError::Delivery(self.redact(&e.to_string())))?;
        if response.status != 200 {
            return Err(crate::BotError::Delivery(self.redact(&format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            ))));
        }
        tracing::info!("Message delivered to chat {}", self.chat_id);
        Ok(())
    }
}
