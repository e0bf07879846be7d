//! Indicator Library.
//!
//! Every indicator reads a chronological value series and reports the value
//! for the most recent point. Short history is never an error: each indicator
//! documents the fallback it degrades to.
//!
//! `calculate_indicators` assembles the full [`IndicatorSet`] snapshot for the
//! last bar of a series; `technical_score` turns that snapshot into the 0–100
//! technical composite.

pub mod bollinger;
pub mod ema;
pub mod factors;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod snapshot;
pub mod technical;

pub use bollinger::{bollinger, BollingerValue};
pub use ema::ema;
pub use factors::{factor_signal, FactorAction, FactorSignal, FactorValues};
pub use macd::{macd, MacdValue};
pub use rsi::rsi;
pub use sma::sma;
pub use snapshot::{calculate_indicators, IndicatorSet};
pub use technical::{technical_breakdown, technical_score, TechnicalBreakdown};

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for the first bar), high/low = max/min(open, close) ± 1.0,
/// volume = 1000, one bar per day starting 2024-01-02.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::PriceBar> {
    use crate::domain::PriceBar;
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                time: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.01),
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
