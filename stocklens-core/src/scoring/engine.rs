//! Composite score: technical × 0.4 + opinion × 0.4 + momentum × 0.2.

use serde::{Deserialize, Serialize};

use crate::domain::{Entity, ExternalOpinion, PriceBar};
use crate::error::InvalidInputError;
use crate::indicators::{calculate_indicators, technical_score, IndicatorSet};

pub const TECHNICAL_WEIGHT: f64 = 0.4;
pub const OPINION_WEIGHT: f64 = 0.4;
pub const MOMENTUM_WEIGHT: f64 = 0.2;

/// Opinion component used when no opinion is available.
pub const NEUTRAL_OPINION: f64 = 50.0;

/// Unweighted components (each 0–100) and the weighted, clamped total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub technical: f64,
    pub opinion: f64,
    pub momentum: f64,
    pub total: f64,
}

/// Opinion component: BUY=100, SELL=0, HOLD=50 blended 60/40 with the
/// collaborator's confidence. Absent → 50.
pub fn opinion_component(opinion: Option<&ExternalOpinion>) -> f64 {
    match opinion {
        Some(op) => op.direction.base_score() * 0.6 + op.confidence.clamp(0.0, 100.0) * 0.4,
        None => NEUTRAL_OPINION,
    }
}

/// Momentum component in [0, 100]: starts at 50, tiered by percent change
/// and by volume ratio.
pub fn momentum_component(change_percent: f64, volume_ratio: f64) -> f64 {
    let mut momentum: f64 = 50.0;

    momentum += if change_percent > 5.0 {
        25.0
    } else if change_percent > 2.0 {
        15.0
    } else if change_percent > 0.0 {
        10.0
    } else if change_percent < -5.0 {
        -25.0
    } else if change_percent < -2.0 {
        -15.0
    } else if change_percent < 0.0 {
        -10.0
    } else {
        0.0
    };

    momentum += if volume_ratio > 2.0 {
        25.0
    } else if volume_ratio > 1.5 {
        15.0
    } else if volume_ratio > 1.0 {
        10.0
    } else if volume_ratio < 0.5 {
        -10.0
    } else {
        0.0
    };

    momentum.clamp(0.0, 100.0)
}

pub fn score_breakdown(
    entity: &Entity,
    indicators: &IndicatorSet,
    opinion: Option<&ExternalOpinion>,
) -> ScoreBreakdown {
    let technical = technical_score(entity.price, indicators);
    let opinion = opinion_component(opinion);
    let momentum = momentum_component(
        entity.change_percent,
        indicators.volume_ratio(entity.volume),
    );
    let total = (technical * TECHNICAL_WEIGHT + opinion * OPINION_WEIGHT + momentum * MOMENTUM_WEIGHT)
        .clamp(0.0, 100.0);
    ScoreBreakdown {
        technical,
        opinion,
        momentum,
        total,
    }
}

/// Final composite score in [0, 100].
pub fn score(entity: &Entity, indicators: &IndicatorSet, opinion: Option<&ExternalOpinion>) -> f64 {
    score_breakdown(entity, indicators, opinion).total
}

/// An entity with its indicator snapshot, optional opinion and score attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEntity {
    #[serde(flatten)]
    pub entity: Entity,
    pub indicators: IndicatorSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opinion: Option<ExternalOpinion>,
    pub score: f64,
}

impl ScoredEntity {
    /// Score `entity` against an already computed snapshot.
    pub fn new(entity: Entity, indicators: IndicatorSet, opinion: Option<ExternalOpinion>) -> Self {
        let score = score(&entity, &indicators, opinion.as_ref());
        Self {
            entity,
            indicators,
            opinion,
            score,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.entity.symbol
    }

    pub fn volume_ratio(&self) -> f64 {
        self.indicators.volume_ratio(self.entity.volume)
    }
}

/// Compute indicators from `bars` and score `entity` in one step.
pub fn evaluate(
    entity: Entity,
    bars: &[PriceBar],
    opinion: Option<ExternalOpinion>,
) -> Result<ScoredEntity, InvalidInputError> {
    let indicators = calculate_indicators(bars)?;
    Ok(ScoredEntity::new(entity, indicators, opinion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
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
    fn opinion_component_mapping() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert_eq!(opinion_component(None), 50.0);
        let buy = ExternalOpinion::new(Direction::Buy, 80.0);
        assert!(close(opinion_component(Some(&buy)), 92.0));
        let sell = ExternalOpinion::new(Direction::Sell, 90.0);
        assert!(close(opinion_component(Some(&sell)), 36.0));
        let hold = ExternalOpinion::new(Direction::Hold, 50.0);
        assert!(close(opinion_component(Some(&hold)), 50.0));
    }

    #[test]
    fn momentum_tiers() {
        assert_eq!(momentum_component(0.0, 1.0), 50.0);
        assert_eq!(momentum_component(6.0, 2.5), 100.0);
        assert_eq!(momentum_component(3.0, 1.6), 80.0);
        assert_eq!(momentum_component(0.5, 1.2), 70.0);
        assert_eq!(momentum_component(-0.5, 0.4), 30.0);
        assert_eq!(momentum_component(-3.0, 1.0), 35.0);
        assert_eq!(momentum_component(-6.0, 0.1), 15.0);
    }

    #[test]
    fn neutral_entity_score_is_pinned() {
        let entity = Entity::new("NEUT", "Neutral Co", 100.0).with_volume(1000);
        let b = score_breakdown(&entity, &neutral_set(100.0), None);
        assert_eq!(b.technical, 42.5);
        assert_eq!(b.opinion, 50.0);
        assert_eq!(b.momentum, 50.0);
        // 42.5*0.4 + 50*0.4 + 50*0.2
        assert!((b.total - 47.0).abs() < 1e-12);
    }

    #[test]
    fn buy_opinion_lifts_score() {
        let entity = Entity::new("UP", "Up Co", 100.0).with_volume(1000);
        let ind = neutral_set(100.0);
        let base = score(&entity, &ind, None);
        let lifted = score(&entity, &ind, Some(&ExternalOpinion::new(Direction::Buy, 100.0)));
        assert!((lifted - base - 20.0).abs() < 1e-9);
    }

    #[test]
    fn scored_entity_flattens_entity_fields() {
        let scored = ScoredEntity::new(
            Entity::new("AAPL", "Apple", 100.0).with_volume(1000),
            neutral_set(100.0),
            None,
        );
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["changePercent"], 0.0);
        assert!(json.get("opinion").is_none());
        assert!(json["indicators"].get("volumeAvg").is_some());
        let back: ScoredEntity = serde_json::from_value(json).unwrap();
        assert_eq!(back, scored);
    }

    #[test]
    fn evaluate_rejects_malformed_bars() {
        let entity = Entity::new("BAD", "Bad", 10.0);
        assert!(matches!(
            evaluate(entity, &[], None),
            Err(InvalidInputError::EmptySeries)
        ));
    }
}
