//! # config — runtime configuration from environment variables

use std::time::Duration;

use anyhow::Context;

/// Default page for the reference instrument (Nasdaq 100).
pub const DEFAULT_PRICE_URL: &str = "https://www.investing.com/indices/nq-100";

/// Everything flatline needs to run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token.
    pub bot_token:     String,
    /// Destination channel (numeric id or `@channel` handle).
    pub channel_id:    String,
    /// Position feed endpoint returning `{ "qty": number, "symbol": string }`.
    pub position_url:  String,
    /// Page to scrape for the reference instrument price.
    pub price_url:     String,
    /// Pause between monitor cycles.
    pub poll_interval: Duration,
    /// Bound on every outbound HTTP call so one dead endpoint
    /// cannot stall the loop past a single cycle.
    pub http_timeout:  Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bot_token = std::env::var("BOT_TOKEN")
            .context("BOT_TOKEN environment variable is required")?;

        let channel_id = std::env::var("CHANNEL_ID")
            .context("CHANNEL_ID environment variable is required")?;

        let position_url = std::env::var("POSITION_URL")
            .context("POSITION_URL environment variable is required")?;

        let interval_secs: u64 = std::env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .context("POLL_INTERVAL_SECS must be a number")?;

        let timeout_secs: u64 = std::env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("HTTP_TIMEOUT_SECS must be a number")?;

        Ok(Self {
            bot_token,
            channel_id,
            position_url,
            price_url:     std::env::var("PRICE_URL")
                .unwrap_or_else(|_| DEFAULT_PRICE_URL.to_string()),
            poll_interval: Duration::from_secs(interval_secs),
            http_timeout:  Duration::from_secs(timeout_secs),
        })
    }
}
