//! Moving Average Convergence Divergence (MACD).
//!
//! line = EMA(fast) - EMA(slow) over the full close series.
//! signal = EMA(signal) of a MACD subseries where, for every bar index
//! `i >= slow`, EMA(fast) - EMA(slow) is recomputed from scratch over
//! `closes[..=i]`.
//! histogram = line - signal.
//!
//! The per-index recomputation costs O(n * slow) and is kept on purpose: an
//! incremental EMA-of-MACD converges differently near the seed and would
//! change the reported values.

use serde::{Deserialize, Serialize};

use super::ema::ema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD of a close series, evaluated at its last close.
///
/// With fewer than `slow + 1` closes the subseries is empty and the signal
/// line falls back to the MACD line itself (histogram 0).
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdValue {
    let line = ema(closes, fast) - ema(closes, slow);

    let subseries: Vec<f64> = (slow..closes.len())
        .map(|i| {
            let prefix = &closes[..=i];
            ema(prefix, fast) - ema(prefix, slow)
        })
        .collect();

    let signal_line = if subseries.is_empty() {
        line
    } else {
        ema(&subseries, signal)
    };

    MacdValue {
        macd: line,
        signal: signal_line,
        histogram: line - signal_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn macd_default(closes: &[f64]) -> MacdValue {
        macd(closes, 12, 26, 9)
    }

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn histogram_is_exact_difference() {
        for n in [1, 10, 26, 27, 40, 120] {
            let m = macd_default(&wave(n));
            assert_eq!(m.histogram, m.macd - m.signal, "n={n}");
        }
    }

    #[test]
    fn short_history_signal_equals_line() {
        let m = macd(&wave(20), 12, 26, 9);
        assert_eq!(m.signal, m.macd);
        assert_eq!(m.histogram, 0.0);
    }

    #[test]
    fn constant_series_is_flat() {
        let m = macd_default(&[50.0; 100]);
        assert_approx(m.macd, 0.0, 1e-9);
        assert_approx(m.signal, 0.0, 1e-9);
    }

    #[test]
    fn signal_built_from_prefix_recomputation() {
        // slow = 3, fast = 2, signal = 2 on 5 closes:
        // subseries over prefixes closes[..=3], closes[..=4]
        let closes = [1.0, 2.0, 4.0, 8.0, 16.0];
        let sub: Vec<f64> = (3..5)
            .map(|i| ema(&closes[..=i], 2) - ema(&closes[..=i], 3))
            .collect();
        let m = macd(&closes, 2, 3, 2);
        assert_approx(m.signal, ema(&sub, 2), DEFAULT_EPSILON);
        assert_approx(m.macd, ema(&closes, 2) - ema(&closes, 3), DEFAULT_EPSILON);
    }

    #[test]
    fn rising_series_has_positive_line() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let m = macd_default(&closes);
        assert!(m.macd > 0.0);
        assert!(m.histogram > 0.0);
    }
}
