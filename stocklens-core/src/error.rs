//! Input validation errors.
//!
//! Short history is never an error: every indicator degrades to a documented
//! fallback. Only malformed input is rejected.

use thiserror::Error;

/// Malformed input handed to the core.
///
/// Each variant names the invariant that failed so the surrounding
/// application can log it verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("{field} price must be > 0 (bar {index}, got {value})")]
    NonPositivePrice {
        field: &'static str,
        index: usize,
        value: f64,
    },

    #[error("{field} must be finite (bar {index})")]
    NonFinite { field: &'static str, index: usize },

    #[error("high must be >= low (bar {index}: high={high}, low={low})")]
    InvalidHighLow { index: usize, high: f64, low: f64 },

    #[error("timestamps must be strictly increasing (bar {index} at {time})")]
    NonMonotonicTime { index: usize, time: String },
}
