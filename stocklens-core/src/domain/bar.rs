//! PriceBar: the fundamental market data unit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// OHLCV bar for a single period.
///
/// Series of bars are chronological with no duplicate timestamps. Bars are
/// never mutated once produced; indicators read them and build new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Absolute candle body size.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Full high-low range of the bar.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// Check a single bar's price invariants.
    pub fn validate(&self, index: usize) -> Result<(), InvalidInputError> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() {
                return Err(InvalidInputError::NonFinite { field, index });
            }
            if value <= 0.0 {
                return Err(InvalidInputError::NonPositivePrice {
                    field,
                    index,
                    value,
                });
            }
        }
        if self.high < self.low {
            return Err(InvalidInputError::InvalidHighLow {
                index,
                high: self.high,
                low: self.low,
            });
        }
        Ok(())
    }
}

/// Validate a whole series: non-empty, every bar sane, timestamps strictly
/// increasing.
pub fn validate_series(bars: &[PriceBar]) -> Result<(), InvalidInputError> {
    if bars.is_empty() {
        return Err(InvalidInputError::EmptySeries);
    }
    for (i, bar) in bars.iter().enumerate() {
        bar.validate(i)?;
        if i > 0 && bar.time <= bars[i - 1].time {
            return Err(InvalidInputError::NonMonotonicTime {
                index: i,
                time: bar.time.to_string(),
            });
        }
    }
    Ok(())
}

/// Extract closing prices in series order.
pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Extract volumes as f64 in series order.
pub fn volumes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn sample_bar(day: u32) -> PriceBar {
        PriceBar {
            time: at(day),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000,
        }
    }

    #[test]
    fn shape_helpers() {
        let bar = sample_bar(2);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
        assert_eq!(bar.body(), 3.0);
        assert_eq!(bar.range(), 7.0);
        assert_eq!(bar.upper_shadow(), 2.0);
        assert_eq!(bar.lower_shadow(), 2.0);
    }

    #[test]
    fn valid_series_passes() {
        let bars = vec![sample_bar(2), sample_bar(3), sample_bar(4)];
        assert!(validate_series(&bars).is_ok());
    }

    #[test]
    fn empty_series_rejected() {
        assert_eq!(validate_series(&[]), Err(InvalidInputError::EmptySeries));
    }

    #[test]
    fn negative_close_rejected() {
        let mut bar = sample_bar(2);
        bar.close = -1.0;
        let err = validate_series(&[bar]).unwrap_err();
        assert!(err.to_string().starts_with("close price must be > 0"));
    }

    #[test]
    fn high_below_low_rejected() {
        let mut bar = sample_bar(2);
        bar.high = 97.0;
        assert!(matches!(
            bar.validate(0),
            Err(InvalidInputError::InvalidHighLow { .. })
        ));
    }

    #[test]
    fn duplicate_timestamp_rejected() {
        let bars = vec![sample_bar(2), sample_bar(2)];
        assert!(matches!(
            validate_series(&bars),
            Err(InvalidInputError::NonMonotonicTime { index: 1, .. })
        ));
    }

    #[test]
    fn nan_rejected() {
        let mut bar = sample_bar(2);
        bar.open = f64::NAN;
        assert_eq!(
            bar.validate(0),
            Err(InvalidInputError::NonFinite {
                field: "open",
                index: 0
            })
        );
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar(2);
        let json = serde_json::to_string(&bar).unwrap();
        let deser: PriceBar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
