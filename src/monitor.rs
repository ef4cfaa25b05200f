//! # monitor — the fetch → diff → notify cycle
//!
//! The only stateful part of the process. One cycle:
//!
//! ```text
//! fetch position ──▶ compare qty against previous
//!                      ├─ unchanged ──▶ skip
//!                      └─ changed   ──▶ fetch price ──▶ format ──▶ notify ──▶ commit
//! ```
//!
//! Every step returns a `Result`; the driver loop does an exhaustive match on
//! the outcome, logs, and sleeps. Nothing a cycle does can escape the loop —
//! the system's value is continuity of observation, not per-cycle success.

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::CycleError;
use crate::message::format_message;
use crate::notifier::Notifier;
use crate::position::PositionSource;
use crate::price::PriceSource;

/// The only state carried across cycles. Single writer (the loop itself),
/// read nowhere else. Lives in memory only; a restart resets it, and the
/// first successful cycle after a restart always notifies.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    /// Quantity committed on the last successful notify. `None` until the
    /// first transition has been announced.
    pub previous_qty:   Option<f64>,
    /// Reference price committed alongside `previous_qty`.
    pub previous_price: f64,
}

/// What one cycle did.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Quantity matched the committed value; nothing sent, nothing changed.
    Unchanged,
    /// A transition was detected, announced, and committed.
    Notified { qty: f64, price: f64 },
}

/// Run one monitor cycle against `state`.
///
/// Commit policy: both state fields move together, and only after the notify
/// call confirms delivery. A failed fetch, parse, format or send leaves the
/// state untouched, so the same transition fires again next cycle.
pub async fn run_cycle<P, Q, N>(
    positions: &P,
    prices: &Q,
    notifier: &N,
    state: &mut MonitorState,
) -> Result<CycleOutcome, CycleError>
where
    P: PositionSource,
    Q: PriceSource,
    N: Notifier,
{
    let snapshot = positions.fetch_position().await?;

    // Exact equality: the feed reports exact quantities, no tolerance wanted.
    // A missing previous value (first cycle after start) always counts as a
    // transition.
    if state.previous_qty == Some(snapshot.qty) {
        debug!(qty = snapshot.qty, "Quantity unchanged");
        return Ok(CycleOutcome::Unchanged);
    }

    // Fresh quote at format time, not a stale one from an earlier cycle.
    let quote = prices.fetch_price().await?;
    let result = quote.price - state.previous_price;

    let text = format_message(&snapshot, Some(result), &quote);
    notifier.notify(&text).await?;

    state.previous_qty = Some(snapshot.qty);
    state.previous_price = quote.price;

    Ok(CycleOutcome::Notified { qty: snapshot.qty, price: quote.price })
}

/// Drive cycles forever. Never returns; the process only stops when the host
/// terminates it.
pub async fn run<P, Q, N>(config: &Config, positions: P, prices: Q, notifier: N)
where
    P: PositionSource,
    Q: PriceSource,
    N: Notifier,
{
    let mut state = MonitorState::default();

    loop {
        match run_cycle(&positions, &prices, &notifier, &mut state).await {
            Ok(CycleOutcome::Notified { qty, price }) => {
                info!(qty, price, "✅ Transition announced");
            }
            Ok(CycleOutcome::Unchanged) => {
                debug!("No transition this cycle");
            }
            Err(e @ CycleError::Fetch { .. }) => {
                warn!(error = %e, "Cycle skipped: upstream unreachable");
            }
            Err(e @ CycleError::Parse { .. }) => {
                warn!(error = %e, "Cycle skipped: upstream response not understood");
            }
            Err(e @ CycleError::Notify { .. }) => {
                error!(error = %e, "Delivery failed — transition will retry next cycle");
            }
        }

        tokio::time::sleep(config.poll_interval).await;
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
