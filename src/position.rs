//! # position — the tracked account's held quantity
//!
//! One `PositionSnapshot` is produced fresh each cycle from the position
//! feed, an HTTP endpoint returning JSON with at least
//! `{ "qty": number, "symbol": string }`. Snapshots are never mutated,
//! only replaced.

use std::time::Duration;

use serde::Deserialize;

use crate::error::CycleError;

/// One observation of the held quantity. `qty` may be zero, positive
/// (long) or negative (short).
#[derive(Debug, Clone, Deserialize)]
pub struct PositionSnapshot {
    pub symbol: String,
    pub qty:    f64,
}

/// Where position snapshots come from. The monitor loop only sees this
/// trait, so tests can script a sequence of snapshots without a network.
pub trait PositionSource {
    async fn fetch_position(&self) -> Result<PositionSnapshot, CycleError>;
}

/// Parse a position feed body. Extra fields are fine; a missing or
/// non-numeric `qty`, or a missing `symbol`, is a parse failure.
pub fn parse_position(body: &str) -> Result<PositionSnapshot, CycleError> {
    serde_json::from_str(body).map_err(|e| CycleError::parse("position feed", e))
}

/// Production source: GET the configured endpoint and parse the body.
pub struct HttpPositionSource {
    client:  reqwest::Client,
    url:     String,
    timeout: Duration,
}

impl HttpPositionSource {
    pub fn new(client: reqwest::Client, url: String, timeout: Duration) -> Self {
        Self { client, url, timeout }
    }
}

impl PositionSource for HttpPositionSource {
    async fn fetch_position(&self) -> Result<PositionSnapshot, CycleError> {
        let resp = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CycleError::fetch("position feed", e))?;

        if !resp.status().is_success() {
            return Err(CycleError::fetch(
                "position feed",
                format!("HTTP {}", resp.status()),
            ));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| CycleError::fetch("position feed", e))?;

        parse_position(&body)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_body() {
        let snap = parse_position(r#"{"qty": -3.5, "symbol": "NDX"}"#).unwrap();
        assert_eq!(snap.symbol, "NDX");
        assert_eq!(snap.qty, -3.5);
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let snap =
            parse_position(r#"{"qty": 2.0, "symbol": "NDX", "account": "main"}"#).unwrap();
        assert_eq!(snap.qty, 2.0);
    }

    #[test]
    fn test_parse_missing_qty_is_parse_error() {
        let err = parse_position(r#"{"symbol": "NDX"}"#).unwrap_err();
        assert!(matches!(err, CycleError::Parse { origin: "position feed", .. }));
    }

    #[test]
    fn test_parse_non_numeric_qty_is_parse_error() {
        let err = parse_position(r#"{"qty": "lots", "symbol": "NDX"}"#).unwrap_err();
        assert!(matches!(err, CycleError::Parse { .. }));
    }

    #[test]
    fn test_parse_non_json_is_parse_error() {
        let err = parse_position("<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, CycleError::Parse { .. }));
    }
}
