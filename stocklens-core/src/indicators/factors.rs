//! Three-factor reversal signal.
//!
//! A rule-based read of the latest bar using:
//! - VPD (volume-price divergence): volume ratio divided by the absolute
//!   one-bar price change, so heavy volume with little movement scores high.
//! - RSI(14) from simple (not Wilder) averages of the last 14 deltas.
//! - Z-score of the close against its 20-bar mean and sample stddev.
//!
//! Rules are checked in order and the first match wins.

use serde::{Deserialize, Serialize};

use super::sma::sma;
use crate::domain::PriceBar;

pub const FACTOR_MIN_BARS: usize = 20;
const FACTOR_RSI_PERIOD: usize = 14;
const FACTOR_WINDOW: usize = 20;
const Z_SCORE_THRESHOLD: f64 = 2.0;
const EPSILON: f64 = 1e-6;
const ZERO_FLOOR: f64 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorAction {
    StrongBuy,
    Buy,
    Hold,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorValues {
    pub vpd: f64,
    pub rsi: f64,
    pub z_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorSignal {
    pub close_price: f64,
    pub factors: FactorValues,
    pub score: f64,
    pub action: FactorAction,
    pub reason: String,
}

/// Evaluate the factor signal at the last bar.
///
/// Returns `None` when fewer than [`FACTOR_MIN_BARS`] bars are available.
pub fn factor_signal(bars: &[PriceBar]) -> Option<FactorSignal> {
    if bars.len() < FACTOR_MIN_BARS {
        return None;
    }
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
    let factors = FactorValues {
        vpd: volume_price_divergence(&closes, &volumes),
        rsi: simple_rsi(&closes, FACTOR_RSI_PERIOD),
        z_score: z_score(&closes, FACTOR_WINDOW),
    };

    let (score, action, reason) = if factors.rsi < 30.0 && factors.vpd > 2.0 {
        (90.0, FactorAction::StrongBuy, "패닉 셀링 포착 (RSI 과매도 + 거래량 급증)")
    } else if factors.z_score < -Z_SCORE_THRESHOLD {
        (75.0, FactorAction::Buy, "가격 괴리 (20일 이평선 대비 과매도)")
    } else if factors.rsi > 70.0 {
        (20.0, FactorAction::Sell, "과매수 구간 진입 (RSI > 70)")
    } else if factors.z_score > Z_SCORE_THRESHOLD {
        (30.0, FactorAction::Sell, "가격 괴리 (20일 이평선 대비 과열)")
    } else {
        (50.0, FactorAction::Hold, "관망 (특이 시그널 없음)")
    };

    Some(FactorSignal {
        close_price: *closes.last()?,
        factors,
        score,
        action,
        reason: reason.to_string(),
    })
}

fn volume_price_divergence(closes: &[f64], volumes: &[f64]) -> f64 {
    let n = closes.len();
    let mut volume_ma = sma(volumes, FACTOR_WINDOW);
    if volume_ma == 0.0 {
        volume_ma = 1.0;
    }
    let change = closes[n - 1] / closes[n - 2] - 1.0;
    (volumes[n - 1] / volume_ma) / (change.abs() + EPSILON)
}

fn simple_rsi(closes: &[f64], period: usize) -> f64 {
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let window = &deltas[deltas.len().saturating_sub(period)..];
    let gain = window.iter().filter(|d| **d > 0.0).sum::<f64>() / period as f64;
    let mut loss = -window.iter().filter(|d| **d < 0.0).sum::<f64>() / period as f64;
    if loss == 0.0 {
        loss = ZERO_FLOOR;
    }
    100.0 - 100.0 / (1.0 + gain / loss)
}

fn z_score(closes: &[f64], window: usize) -> f64 {
    let tail = &closes[closes.len() - window..];
    let mean = sma(tail, window);
    let variance = tail.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
    let mut stddev = variance.sqrt();
    if stddev == 0.0 {
        stddev = ZERO_FLOOR;
    }
    (closes[closes.len() - 1] - mean) / stddev
}
