//! # error
//!
//! Cycle-local error taxonomy.
//!
//! Every failure a monitor cycle can hit falls into one of three kinds:
//! transport, response shape, or delivery. All three are recoverable — the
//! loop logs them and waits for the next interval. Only startup configuration
//! errors (handled with `anyhow` in `main`) are fatal.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CycleError {
    /// Network / transport failure talking to an upstream.
    #[error("fetch from {origin} failed: {detail}")]
    Fetch { origin: &'static str, detail: String },

    /// The upstream answered, but not in the shape we expect.
    /// For the price page this usually means layout drift, not an outage.
    #[error("could not parse {origin} response: {detail}")]
    Parse { origin: &'static str, detail: String },

    /// The notification send call errored.
    #[error("notify failed: {detail}")]
    Notify { detail: String },
}

impl CycleError {
    pub fn fetch(origin: &'static str, err: impl std::fmt::Display) -> Self {
        CycleError::Fetch { origin, detail: err.to_string() }
    }

    pub fn parse(origin: &'static str, err: impl std::fmt::Display) -> Self {
        CycleError::Parse { origin, detail: err.to_string() }
    }

    pub fn notify(err: impl std::fmt::Display) -> Self {
        CycleError::Notify { detail: err.to_string() }
    }
}
