//! # Flatline — position-change monitor
//!
//! Long-lived background agent. Every cycle it polls a position feed, and
//! when the held quantity changes it scrapes the reference index price,
//! computes the points made since the last transition, and announces the new
//! position to a Telegram channel.
//!
//! ## Flow
//! ```text
//! loop every N seconds:
//!   1. GET position feed → { qty, symbol }
//!   2. qty unchanged? → sleep and repeat
//!   3. Scrape reference price page → quote
//!   4. Format "Flat / Long / Short" message
//!   5. sendMessage → Telegram channel
//!   6. Commit new qty + price (only after delivery)
//! ```

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod error;
mod message;
mod monitor;
mod notifier;
mod position;
mod price;

use config::Config;
use notifier::TelegramNotifier;
use position::HttpPositionSource;
use price::InvestingPriceSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("flatline=debug".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    info!(
        r#"

  ╔═══════════════════════════════════════════╗
  ║   FLATLINE — Position Change Monitor      ║
  ╚═══════════════════════════════════════════╝"#
    );

    let config = Config::from_env().context("Failed to load config")?;
    let client = reqwest::Client::new();

    info!(
        position_feed = %config.position_url,
        price_page    = %config.price_url,
        channel       = %config.channel_id,
        interval      = ?config.poll_interval,
        "Flatline started"
    );

    let positions = HttpPositionSource::new(
        client.clone(),
        config.position_url.clone(),
        config.http_timeout,
    );
    let prices = InvestingPriceSource::new(
        client.clone(),
        config.price_url.clone(),
        config.http_timeout,
    );
    let notifier = TelegramNotifier::new(
        client,
        &config.bot_token,
        config.channel_id.clone(),
        config.http_timeout,
    );

    monitor::run(&config, positions, prices, notifier).await;

    Ok(())
}
