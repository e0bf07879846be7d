//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and average losses:
//! seed both averages from the first `period` deltas, then walk forward with
//! `avg = (avg * (period - 1) + delta) / period`.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! Edge cases: fewer than `period + 1` closes → 50; avg_loss == 0 → 100.

/// Neutral value reported when there is not enough history.
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI of a close series, evaluated at its last close.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    let period = period.max(1);
    if closes.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let p = period as f64;

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for &delta in &deltas[..period] {
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss -= delta;
        }
    }
    avg_gain /= p;
    avg_loss /= p;

    for &delta in &deltas[period..] {
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
