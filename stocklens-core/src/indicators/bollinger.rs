//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses population stddev (divide by N).
//! Short history (fewer than `period` closes): all three bands collapse to
//! the SMA of what is available.

use serde::{Deserialize, Serialize};

use super::sma::sma;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerValue {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerValue {
    /// Position of `price` inside the bands: 0 at the lower band, 1 at the
    /// upper band. Zero-width bands report 0.5.
    pub fn position(&self, price: f64) -> f64 {
        let width = self.upper - self.lower;
        if width <= 0.0 {
            return 0.5;
        }
        (price - self.lower) / width
    }
}

/// Bollinger Bands of a close series, evaluated at its last close.
pub fn bollinger(closes: &[f64], period: usize, multiplier: f64) -> BollingerValue {
    let period = period.max(1);
    let middle = sma(closes, period);

    if closes.len() < period {
        return BollingerValue {
            upper: middle,
            middle,
            lower: middle,
        };
    }

    let window = &closes[closes.len() - period..];
    let variance = window
        .iter()
        .map(|c| {
            let diff = c - middle;
            diff * diff
        })
        .sum::<f64>()
        / period as f64;
    let stddev = variance.sqrt();

    BollingerValue {
        upper: middle + multiplier * stddev,
        middle,
        lower: middle - multiplier * stddev,
    }
}
