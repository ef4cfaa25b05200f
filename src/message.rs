//! # message — snapshot → notification text
//!
//! Pure formatting, no I/O. The quote is fetched by the loop right before
//! formatting so the message always shows the latest price, even when the
//! triggering snapshot is a few seconds older.

use crate::position::PositionSnapshot;
use crate::price::PriceQuote;

/// Build the outgoing notification.
///
/// | qty  | shape                                             |
/// |------|---------------------------------------------------|
/// | == 0 | `Flat` + price line + `Result: {points} points`   |
/// | > 0  | `Long {symbol}` + price line                      |
/// | < 0  | `Short {symbol}` + price line                     |
///
/// The result line only appears on a flat (position closed) message; an open
/// has no realized result yet.
pub fn format_message(
    snapshot: &PositionSnapshot,
    result: Option<f64>,
    quote: &PriceQuote,
) -> String {
    let price_line = format!("{} {}", quote.label, quote.raw);

    if snapshot.qty == 0.0 {
        match result {
            Some(points) => {
                format!("Flat\n{price_line}\nResult: {} points", format_points(points))
            }
            None => format!("Flat\n{price_line}"),
        }
    } else if snapshot.qty > 0.0 {
        format!("Long {} {price_line}", snapshot.symbol)
    } else {
        format!("Short {} {price_line}", snapshot.symbol)
    }
}

/// Render a point result with at least one decimal place, so a whole-number
/// result reads "50.0", not "50".
fn format_points(value: f64) -> String {
    if value == value.trunc() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
