//! Candlestick pattern detection.
//!
//! Each detector reads the trailing 1–3 bars of a window and answers yes or
//! no. Detectors are independent: one window can match several patterns at
//! once. Windows too short for a detector simply do not match.

pub mod candles;
pub mod stats;

use serde::{Deserialize, Serialize};

use crate::domain::PriceBar;

pub use stats::{forward_outcomes, pattern_stats, PatternStats, SUCCESS_THRESHOLD_PCT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    BullishEngulfing,
    BearishEngulfing,
    Hammer,
    ShootingStar,
    Doji,
    MorningStar,
}

impl PatternKind {
    pub const ALL: [PatternKind; 6] = [
        Self::BullishEngulfing,
        Self::BearishEngulfing,
        Self::Hammer,
        Self::ShootingStar,
        Self::Doji,
        Self::MorningStar,
    ];

    /// Fixed confidence weight reported with every match.
    pub fn confidence(self) -> f64 {
        match self {
            Self::BullishEngulfing | Self::BearishEngulfing => 85.0,
            Self::Hammer | Self::ShootingStar => 80.0,
            Self::MorningStar => 90.0,
            Self::Doji => 70.0,
        }
    }

    /// Number of trailing bars the detector consumes.
    pub fn window(self) -> usize {
        match self {
            Self::Hammer | Self::ShootingStar | Self::Doji => 1,
            Self::BullishEngulfing | Self::BearishEngulfing => 2,
            Self::MorningStar => 3,
        }
    }

    pub fn matches(self, bars: &[PriceBar]) -> bool {
        match self {
            Self::BullishEngulfing => candles::is_bullish_engulfing(bars),
            Self::BearishEngulfing => candles::is_bearish_engulfing(bars),
            Self::Hammer => candles::is_hammer(bars),
            Self::ShootingStar => candles::is_shooting_star(bars),
            Self::Doji => candles::is_doji(bars),
            Self::MorningStar => candles::is_morning_star(bars),
        }
    }
}

/// One confirmed detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatch {
    pub pattern_id: PatternKind,
    pub confidence: f64,
    pub window_of_bars: usize,
    pub price_at_match: f64,
}

/// Run every detector against the trailing bars of `window`.
pub fn detect_patterns(window: &[PriceBar]) -> Vec<PatternMatch> {
    let Some(last) = window.last() else {
        return Vec::new();
    };
    PatternKind::ALL
        .iter()
        .filter(|kind| kind.matches(window))
        .map(|&kind| PatternMatch {
            pattern_id: kind,
            confidence: kind.confidence(),
            window_of_bars: kind.window(),
            price_at_match: last.close,
        })
        .collect()
}

/// Walk a full series and report every match keyed by the index of the bar
/// that completed it.
pub fn scan_patterns(bars: &[PriceBar]) -> Vec<(usize, PatternMatch)> {
    (0..bars.len())
        .flat_map(|i| {
            detect_patterns(&bars[..=i])
                .into_iter()
                .map(move |m| (i, m))
        })
        .collect()
}
