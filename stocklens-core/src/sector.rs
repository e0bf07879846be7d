//! Sector aggregation: grouping, trend classification and surging
//! selection over a snapshot of scored entities.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::scoring::ScoredEntity;

/// Score at or above which an entity counts as strong.
pub const STRONG_SCORE: f64 = 70.0;

pub const SURGE_MIN_VOLUME_RATIO: f64 = 1.5;
pub const SURGE_MIN_CHANGE: f64 = 1.5;
pub const SURGE_MIN_SCORE: f64 = 65.0;
pub const SURGE_RSI_RANGE: (f64, f64) = (40.0, 75.0);
pub const MAX_EXPECTED_GROWTH: f64 = 30.0;
pub const MAX_CATALYSTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectorTrend {
    Bullish,
    Bearish,
    Neutral,
}

/// Trend classification of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReading {
    pub trend: SectorTrend,
    pub confidence: f64,
    pub average_change: f64,
    pub strong_count: usize,
}

/// A surging entity with its rank and the reasons it was picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgingEntry {
    pub entity: ScoredEntity,
    pub rank: usize,
    pub expected_growth: f64,
    pub catalyst_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorSummary {
    pub category_key: String,
    pub trend: SectorTrend,
    pub confidence: f64,
    pub average_change: f64,
    pub strong_count: usize,
    pub top_entities: Vec<SurgingEntry>,
}

/// Entities whose sector tag equals `category`.
pub fn group_by_category(entities: &[ScoredEntity], category: &str) -> Vec<ScoredEntity> {
    entities
        .iter()
        .filter(|e| e.entity.in_sector(category))
        .cloned()
        .collect()
}

/// Classify the trend of a group.
///
/// BULLISH: average change > 2 and more than half strong.
/// BEARISH: average change < -2 and under 30% strong.
/// Otherwise NEUTRAL. An empty group is NEUTRAL with confidence 0.
pub fn trend(entities: &[ScoredEntity]) -> TrendReading {
    if entities.is_empty() {
        return TrendReading {
            trend: SectorTrend::Neutral,
            confidence: 0.0,
            average_change: 0.0,
            strong_count: 0,
        };
    }

    let n = entities.len() as f64;
    let average_change = entities.iter().map(|e| e.entity.change_percent).sum::<f64>() / n;
    let strong_count = entities.iter().filter(|e| e.score >= STRONG_SCORE).count();
    let strong_ratio = strong_count as f64 / n;

    let (trend, confidence) = if average_change > 2.0 && strong_ratio > 0.5 {
        (
            SectorTrend::Bullish,
            (70.0 + average_change * 5.0 + strong_ratio * 20.0).min(95.0),
        )
    } else if average_change < -2.0 && strong_ratio < 0.3 {
        (
            SectorTrend::Bearish,
            (70.0 + average_change.abs() * 5.0).min(95.0),
        )
    } else {
        (SectorTrend::Neutral, 50.0 + average_change.abs() * 2.0)
    };

    TrendReading {
        trend,
        confidence,
        average_change,
        strong_count,
    }
}

fn is_surging(e: &ScoredEntity) -> bool {
    let (rsi_lo, rsi_hi) = SURGE_RSI_RANGE;
    e.volume_ratio() >= SURGE_MIN_VOLUME_RATIO
        && e.entity.change_percent >= SURGE_MIN_CHANGE
        && e.score >= SURGE_MIN_SCORE
        && (rsi_lo..=rsi_hi).contains(&e.indicators.rsi)
}

/// Shortlist entities meeting every surge condition, best score first,
/// at most `limit` of them, ranked from 1.
pub fn select_surging(entities: &[ScoredEntity], limit: usize) -> Vec<SurgingEntry> {
    let mut candidates: Vec<&ScoredEntity> = entities.iter().filter(|e| is_surging(e)).collect();
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    candidates
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, e)| SurgingEntry {
            entity: e.clone(),
            rank: i + 1,
            expected_growth: expected_growth(e),
            catalyst_tags: catalyst_tags(e),
        })
        .collect()
}

/// Growth estimate in percent, clamped to [0, 30]: the opinion's expected
/// return when present, otherwise RSI-band bonus + positive-MACD bonus + half
/// the day's change.
pub fn expected_growth(e: &ScoredEntity) -> f64 {
    let estimate = match e.opinion.as_ref().and_then(|op| op.expected_return) {
        Some(expected) => expected,
        None => {
            let rsi = e.indicators.rsi;
            let rsi_bonus = if (50.0..=65.0).contains(&rsi) { 10.0 } else { 5.0 };
            let macd_bonus = if e.indicators.macd.histogram > 0.0 { 5.0 } else { 0.0 };
            rsi_bonus + macd_bonus + e.entity.change_percent * 0.5
        }
    };
    estimate.clamp(0.0, MAX_EXPECTED_GROWTH)
}

/// Up to four short reasons an entity is moving, in a fixed order: volume
/// tier, RSI zone, MACD crossover, moving-average breakout, then opinion
/// factors with impact above 30.
pub fn catalyst_tags(e: &ScoredEntity) -> Vec<String> {
    let ind = &e.indicators;
    let mut tags = Vec::with_capacity(MAX_CATALYSTS);

    let ratio = e.volume_ratio();
    tags.push(
        if ratio >= 3.0 {
            "거래량 폭증"
        } else if ratio >= 2.0 {
            "거래량 급증"
        } else {
            "거래량 증가"
        }
        .to_string(),
    );

    tags.push(
        if (50.0..=65.0).contains(&ind.rsi) {
            "상승 모멘텀"
        } else if ind.rsi > 65.0 {
            "과매수 근접"
        } else {
            "중립 구간"
        }
        .to_string(),
    );

    if ind.macd.histogram > 0.0 && ind.macd.macd > ind.macd.signal {
        tags.push("MACD 골든크로스".to_string());
    }

    if e.entity.price > ind.sma20 && ind.sma20 > ind.sma50 {
        tags.push("이평선 돌파".to_string());
    }

    if let Some(op) = &e.opinion {
        tags.extend(
            op.factors
                .iter()
                .filter(|f| f.impact > 30.0)
                .map(|f| f.name.clone()),
        );
    }

    tags.truncate(MAX_CATALYSTS);
    tags
}

/// Trend and surging shortlist for one category.
pub fn summarize_sector(entities: &[ScoredEntity], category: &str, limit: usize) -> SectorSummary {
    let group = group_by_category(entities, category);
    let reading = trend(&group);
    SectorSummary {
        category_key: category.to_string(),
        trend: reading.trend,
        confidence: reading.confidence,
        average_change: reading.average_change,
        strong_count: reading.strong_count,
        top_entities: select_surging(&group, limit),
    }
}

/// One summary per distinct sector tag present, ordered by category key.
/// Untagged entities are not part of any sector.
pub fn summarize_all(entities: &[ScoredEntity], limit: usize) -> Vec<SectorSummary> {
    let categories: BTreeSet<&str> = entities
        .iter()
        .filter_map(|e| e.entity.sector.as_deref())
        .collect();
    categories
        .into_iter()
        .map(|c| summarize_sector(entities, c, limit))
        .collect()
}
