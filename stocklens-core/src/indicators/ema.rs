//! Exponential Moving Average (EMA).
//!
//! multiplier = 2 / (period + 1)
//! Seed: SMA of the first `period` values, then
//! `ema = (price - ema) * multiplier + ema` for each remaining value in order.
//! Short history (fewer than `period` values): SMA over all values.

use super::sma::sma;

/// EMA of a raw series, evaluated at its last value.
///
/// Also used by MACD for both the line and the signal subseries.
pub fn ema(values: &[f64], period: usize) -> f64 {
    let period = period.max(1);
    if values.len() < period {
        return sma(values, period);
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = sma(&values[..period], period);
    for &price in &values[period..] {
        ema = (price - ema) * multiplier + ema;
    }
    ema
}
