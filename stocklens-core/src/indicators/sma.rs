//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the last `period` values.
//! Short history: mean of whatever is available (a single point is returned
//! as-is). An empty slice yields 0.

/// SMA of the trailing `period` values of a raw series.
pub fn sma(values: &[f64], period: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let period = period.max(1);
    let window = if values.len() < period {
        values
    } else {
        &values[values.len() - period..]
    };
    window.iter().sum::<f64>() / window.len() as f64
}
