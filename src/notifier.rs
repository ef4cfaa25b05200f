//! # notifier — deliver the message to Telegram
//!
//! Thin wrapper over the Bot API `sendMessage` call. Success means "the send
//! call did not error"; there is no delivery receipt beyond that.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::CycleError;

/// Sink for outgoing notifications.
pub trait Notifier {
    async fn notify(&self, text: &str) -> Result<(), CycleError>;
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok:          bool,
    description: Option<String>,
}

/// Production sink: Telegram Bot API over HTTPS.
pub struct TelegramNotifier {
    client:  reqwest::Client,
    url:     String,
    chat_id: String,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(
        client: reqwest::Client,
        bot_token: &str,
        chat_id: String,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            url: format!("https://api.telegram.org/bot{bot_token}/sendMessage"),
            chat_id,
            timeout,
        }
    }
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), CycleError> {
        debug!(chat_id = %self.chat_id, chars = text.len(), "Sending Telegram message...");

        let resp = self
            .client
            .post(&self.url)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CycleError::notify(e))?;

        let status = resp.status();
        let body: TelegramResponse = resp
            .json()
            .await
            .map_err(|e| CycleError::notify(format!("HTTP {status}, unreadable body: {e}")))?;

        if !status.is_success() || !body.ok {
            let why = body.description.unwrap_or_else(|| "no description".to_string());
            return Err(CycleError::notify(format!("HTTP {status}: {why}")));
        }

        Ok(())
    }
}
