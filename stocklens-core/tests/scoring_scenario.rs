//! End-to-end scoring scenarios: raw bars → indicators → score → category.

use chrono::{Duration, NaiveDate};
use stocklens_core::domain::{Direction, Entity, ExternalOpinion, PriceBar};
use stocklens_core::indicators::{calculate_indicators, technical_breakdown};
use stocklens_core::scoring::{evaluate, score_breakdown, ScoreCategory};
use stocklens_core::InvalidInputError;

/// Geometric series: `days` bars compounding at `daily_pct` with constant volume.
fn compounding_bars(days: usize, start: f64, daily_pct: f64) -> Vec<PriceBar> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let factor = 1.0 + daily_pct / 100.0;
    let mut prev = start;
    (0..days)
        .map(|i| {
            let close = start * factor.powi(i as i32);
            let open = prev;
            prev = close;
            PriceBar {
                time: base + Duration::days(i as i64),
                open,
                high: open.max(close) * 1.002,
                low: open.min(close) * 0.998,
                close,
                volume: 50_000,
            }
        })
        .collect()
}

#[test]
fn steady_uptrend_scores_as_neutral_band() {
    let bars = compounding_bars(250, 100.0, 0.5);
    let last = bars.last().unwrap().close;

    let set = calculate_indicators(&bars).unwrap();
    let parts = technical_breakdown(last, &set);

    // No down days at all.
    assert_eq!(set.rsi, 100.0);
    assert_eq!(parts.rsi, 0.0);
    // Price above every average, averages stacked, fast EMA above slow.
    assert_eq!(parts.moving_averages, 15.0);
    assert_eq!(parts.trend, 15.0);
    assert_eq!(parts.crossover, 15.0);
    // Lagging signal line leaves a small positive histogram.
    assert!(set.macd.histogram > 0.0);
    assert!(parts.macd > 10.0 && parts.macd < 20.0);
    // Price pinned near the upper band.
    assert_eq!(parts.bollinger, 0.0);

    let technical = parts.total();
    assert!(technical > 50.0 && technical < 70.0, "technical = {technical}");

    let entity = Entity::new("005930", "삼성전자", last)
        .with_change(0.5)
        .with_volume(50_000);
    let scored = evaluate(entity.clone(), &bars, None).unwrap();
    let breakdown = score_breakdown(&entity, &scored.indicators, None);

    assert_eq!(breakdown.opinion, 50.0);
    // +10 for a small gain, volume ratio exactly 1.
    assert_eq!(breakdown.momentum, 60.0);
    assert_eq!(scored.score, breakdown.total);
    assert_eq!(ScoreCategory::from_score(scored.score), ScoreCategory::Neutral);
    assert_eq!(ScoreCategory::from_score(scored.score).label(), "보통");
}

#[test]
fn strong_buy_opinion_lifts_category() {
    let bars = compounding_bars(250, 100.0, 0.5);
    let last = bars.last().unwrap().close;
    let entity = Entity::new("005930", "삼성전자", last)
        .with_change(3.0)
        .with_volume(120_000);

    let plain = evaluate(entity.clone(), &bars, None).unwrap();
    let backed = evaluate(
        entity,
        &bars,
        Some(ExternalOpinion::new(Direction::Buy, 90.0)),
    )
    .unwrap();

    // opinion 100*0.6 + 90*0.4 = 96 vs neutral 50 → +18.4 final points.
    assert!((backed.score - plain.score - 18.4).abs() < 1e-9);
    assert!(backed.score >= 60.0);
}

#[test]
fn steady_downtrend_scores_weak() {
    let bars = compounding_bars(250, 300.0, -0.5);
    let last = bars.last().unwrap().close;
    let set = calculate_indicators(&bars).unwrap();
    let parts = technical_breakdown(last, &set);

    assert_eq!(set.rsi, 0.0);
    assert_eq!(parts.rsi, 20.0);
    assert_eq!(parts.moving_averages, 0.0);
    assert_eq!(parts.trend, 0.0);
    assert_eq!(parts.crossover, 0.0);
    assert_eq!(parts.bollinger, 15.0);

    let entity = Entity::new("X", "X", last).with_change(-0.5).with_volume(50_000);
    let scored = evaluate(entity, &bars, None).unwrap();
    assert!(scored.score < 50.0, "score = {}", scored.score);
}

#[test]
fn invalid_series_is_rejected_before_scoring() {
    let mut bars = compounding_bars(30, 100.0, 0.5);
    bars[10].time = bars[9].time;
    let entity = Entity::new("X", "X", 100.0);
    assert!(matches!(
        evaluate(entity.clone(), &bars, None),
        Err(InvalidInputError::NonMonotonicTime { index: 10, .. })
    ));

    let mut bars = compounding_bars(30, 100.0, 0.5);
    bars[3].close = 0.0;
    assert!(matches!(
        evaluate(entity, &bars, None),
        Err(InvalidInputError::NonPositivePrice { field: "close", index: 3, .. })
    ));
}
