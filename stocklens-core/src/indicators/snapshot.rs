//! IndicatorSet: the full read-only indicator snapshot for the last bar of a
//! series.

use serde::{Deserialize, Serialize};

use super::bollinger::{bollinger, BollingerValue};
use super::ema::ema;
use super::macd::{macd, MacdValue};
use super::rsi::rsi;
use super::sma::sma;
use crate::domain::{closes, validate_series, volumes, PriceBar};
use crate::error::InvalidInputError;

pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STDDEV: f64 = 2.0;
pub const VOLUME_AVG_PERIOD: usize = 20;

/// Indicator snapshot computed from a bar series ending at a given bar.
///
/// Recomputed from scratch for every new bar and never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub rsi: f64,
    pub macd: MacdValue,
    pub bollinger: BollingerValue,
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub volume_avg: f64,
}

impl IndicatorSet {
    /// Compute the snapshot from raw close and volume series without
    /// validation. Both slices must be in chronological order.
    pub fn from_series(closes: &[f64], volumes: &[f64]) -> Self {
        Self {
            rsi: rsi(closes, RSI_PERIOD),
            macd: macd(closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL),
            bollinger: bollinger(closes, BOLLINGER_PERIOD, BOLLINGER_STDDEV),
            sma20: sma(closes, 20),
            sma50: sma(closes, 50),
            sma200: sma(closes, 200),
            ema12: ema(closes, 12),
            ema26: ema(closes, 26),
            volume_avg: sma(volumes, VOLUME_AVG_PERIOD),
        }
    }

    /// Volume of the current period relative to the 20-period average.
    /// With no volume history the ratio is neutral (1.0).
    pub fn volume_ratio(&self, volume: u64) -> f64 {
        if self.volume_avg > 0.0 {
            volume as f64 / self.volume_avg
        } else {
            1.0
        }
    }
}

/// Validate `bars` and compute the [`IndicatorSet`] for the last bar.
pub fn calculate_indicators(bars: &[PriceBar]) -> Result<IndicatorSet, InvalidInputError> {
    validate_series(bars)?;
    Ok(IndicatorSet::from_series(&closes(bars), &volumes(bars)))
}
