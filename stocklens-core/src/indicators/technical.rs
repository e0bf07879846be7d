//! Technical composite score (0–100).
//!
//! Weighted rubric over an [`IndicatorSet`] and the current price:
//!
//! | component        | max | rule                                                    |
//! |------------------|-----|---------------------------------------------------------|
//! | RSI              | 20  | <30: 20, <40: 15, <=60: 10, <=70: 5, else 0             |
//! | MACD histogram   | 20  | 10 + clamp(hist * 10, -10, 10)                          |
//! | Bollinger        | 15  | position <0.2: 15, <0.4: 12, <=0.6: 7.5, <=0.8: 3, else 0 |
//! | MA checks        | 15  | +5 each: price > sma20, > sma50, > sma200               |
//! | Trend ordering   | 15  | sma20 > sma50 > sma200: 15, reverse: 0, else 7.5        |
//! | EMA crossover    | 15  | ema12 > ema26: 15, ema12 < ema26: 0, equal: 7.5         |
//!
//! These breakpoints are scoring policy. Changing any of them changes every
//! downstream score and category.

use serde::{Deserialize, Serialize};

use super::snapshot::IndicatorSet;

/// Per-component contributions of the technical score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalBreakdown {
    pub rsi: f64,
    pub macd: f64,
    pub bollinger: f64,
    pub moving_averages: f64,
    pub trend: f64,
    pub crossover: f64,
}

impl TechnicalBreakdown {
    /// Sum of all components, clamped to [0, 100].
    pub fn total(&self) -> f64 {
        (self.rsi + self.macd + self.bollinger + self.moving_averages + self.trend + self.crossover)
            .clamp(0.0, 100.0)
    }
}

pub fn technical_breakdown(price: f64, ind: &IndicatorSet) -> TechnicalBreakdown {
    TechnicalBreakdown {
        rsi: rsi_points(ind.rsi),
        macd: macd_points(ind.macd.histogram),
        bollinger: bollinger_points(ind.bollinger.position(price)),
        moving_averages: moving_average_points(price, ind),
        trend: trend_points(ind),
        crossover: crossover_points(ind.ema12, ind.ema26),
    }
}

/// Technical composite score in [0, 100].
pub fn technical_score(price: f64, ind: &IndicatorSet) -> f64 {
    technical_breakdown(price, ind).total()
}

fn rsi_points(rsi: f64) -> f64 {
    if rsi < 30.0 {
        20.0
    } else if rsi < 40.0 {
        15.0
    } else if rsi <= 60.0 {
        10.0
    } else if rsi <= 70.0 {
        5.0
    } else {
        0.0
    }
}

fn macd_points(histogram: f64) -> f64 {
    // NaN histogram (never produced by validated input) scores as flat.
    if histogram.is_nan() {
        return 10.0;
    }
    10.0 + (histogram * 10.0).clamp(-10.0, 10.0)
}

// Mean-reversion bias: closer to the lower band scores higher.
fn bollinger_points(position: f64) -> f64 {
    if position < 0.2 {
        15.0
    } else if position < 0.4 {
        12.0
    } else if position <= 0.6 {
        7.5
    } else if position <= 0.8 {
        3.0
    } else {
        0.0
    }
}

fn moving_average_points(price: f64, ind: &IndicatorSet) -> f64 {
    [ind.sma20, ind.sma50, ind.sma200]
        .iter()
        .filter(|&&ma| price > ma)
        .count() as f64
        * 5.0
}

fn trend_points(ind: &IndicatorSet) -> f64 {
    if ind.sma20 > ind.sma50 && ind.sma50 > ind.sma200 {
        15.0
    } else if ind.sma20 < ind.sma50 && ind.sma50 < ind.sma200 {
        0.0
    } else {
        7.5
    }
}

fn crossover_points(ema12: f64, ema26: f64) -> f64 {
    if ema12 > ema26 {
        15.0
    } else if ema12 < ema26 {
        0.0
    } else {
        7.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{BollingerValue, MacdValue};

    fn neutral_set(price: f64) -> IndicatorSet {
        IndicatorSet {
            rsi: 50.0,
            macd: MacdValue {
                macd: 0.0,
                signal: 0.0,
                histogram: 0.0,
            },
            bollinger: BollingerValue {
                upper: price + 10.0,
                middle: price,
                lower: price - 10.0,
            },
            sma20: price,
            sma50: price,
            sma200: price,
            ema12: price,
            ema26: price,
            volume_avg: 1000.0,
        }
    }

    #[test]
    fn neutral_snapshot_is_pinned() {
        let b = technical_breakdown(100.0, &neutral_set(100.0));
        assert_eq!(b.rsi, 10.0);
        assert_eq!(b.macd, 10.0);
        assert_eq!(b.bollinger, 7.5);
        assert_eq!(b.moving_averages, 0.0);
        assert_eq!(b.trend, 7.5);
        assert_eq!(b.crossover, 7.5);
        assert_eq!(b.total(), 42.5);
    }

    #[test]
    fn rsi_breakpoints() {
        assert_eq!(rsi_points(29.9), 20.0);
        assert_eq!(rsi_points(30.0), 15.0);
        assert_eq!(rsi_points(40.0), 10.0);
        assert_eq!(rsi_points(60.0), 10.0);
        assert_eq!(rsi_points(70.0), 5.0);
        assert_eq!(rsi_points(70.1), 0.0);
    }

    #[test]
    fn macd_histogram_is_capped() {
        assert_eq!(macd_points(5.0), 20.0);
        assert_eq!(macd_points(-5.0), 0.0);
        assert_eq!(macd_points(0.25), 12.5);
    }

    #[test]
    fn bollinger_prefers_lower_band() {
        assert_eq!(bollinger_points(0.0), 15.0);
        assert_eq!(bollinger_points(0.3), 12.0);
        assert_eq!(bollinger_points(0.7), 3.0);
        assert_eq!(bollinger_points(1.2), 0.0);
    }

    #[test]
    fn full_bull_alignment() {
        let mut ind = neutral_set(100.0);
        ind.sma20 = 95.0;
        ind.sma50 = 90.0;
        ind.sma200 = 80.0;
        ind.ema12 = 99.0;
        ind.ema26 = 96.0;
        let b = technical_breakdown(100.0, &ind);
        assert_eq!(b.moving_averages, 15.0);
        assert_eq!(b.trend, 15.0);
        assert_eq!(b.crossover, 15.0);
    }

    #[test]
    fn reverse_ordering_scores_zero() {
        let mut ind = neutral_set(100.0);
        ind.sma20 = 101.0;
        ind.sma50 = 105.0;
        ind.sma200 = 110.0;
        ind.ema12 = 100.0;
        ind.ema26 = 102.0;
        let b = technical_breakdown(100.0, &ind);
        assert_eq!(b.moving_averages, 0.0);
        assert_eq!(b.trend, 0.0);
        assert_eq!(b.crossover, 0.0);
    }
}
