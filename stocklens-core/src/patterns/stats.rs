//! Offline pattern statistics.
//!
//! Aggregates historical (entry, exit) price pairs for one pattern into a
//! success rate and an average forward return. Pure: no clock, no state.

use serde::{Deserialize, Serialize};

use super::{PatternKind, PatternMatch};
use crate::domain::PriceBar;

/// A match counts as a success when its forward return exceeds this (percent).
pub const SUCCESS_THRESHOLD_PCT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternStats {
    pub pattern_id: PatternKind,
    /// Fraction of matches (0..=1) whose forward return beat the threshold.
    pub success_rate: f64,
    /// Mean forward return across all matches, in percent.
    pub avg_return: f64,
    pub sample_size: usize,
}

/// Aggregate (entry, exit) price pairs. Pairs with a non-positive entry are
/// skipped. No usable pairs → all-zero stats.
pub fn pattern_stats(pattern_id: PatternKind, outcomes: &[(f64, f64)]) -> PatternStats {
    let returns: Vec<f64> = outcomes
        .iter()
        .filter(|(entry, _)| *entry > 0.0)
        .map(|(entry, exit)| (exit - entry) / entry * 100.0)
        .collect();

    if returns.is_empty() {
        return PatternStats {
            pattern_id,
            success_rate: 0.0,
            avg_return: 0.0,
            sample_size: 0,
        };
    }

    let n = returns.len() as f64;
    let successes = returns.iter().filter(|r| **r > SUCCESS_THRESHOLD_PCT).count();
    PatternStats {
        pattern_id,
        success_rate: successes as f64 / n,
        avg_return: returns.iter().sum::<f64>() / n,
        sample_size: returns.len(),
    }
}

/// Pair each match of `pattern_id` with the close `horizon` bars later.
///
/// Matches too close to the end of the series have no outcome yet and are
/// dropped.
pub fn forward_outcomes(
    bars: &[PriceBar],
    matches: &[(usize, PatternMatch)],
    pattern_id: PatternKind,
    horizon: usize,
) -> Vec<(f64, f64)> {
    matches
        .iter()
        .filter(|(_, m)| m.pattern_id == pattern_id)
        .filter_map(|(i, m)| {
            bars.get(i + horizon)
                .map(|exit| (m.price_at_match, exit.close))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};
    use crate::patterns::scan_patterns;

    #[test]
    fn success_rate_and_average() {
        // +5%, -2%, +2% (not > 2), +10%
        let outcomes = [(100.0, 105.0), (50.0, 49.0), (10.0, 10.2), (20.0, 22.0)];
        let stats = pattern_stats(PatternKind::Hammer, &outcomes);
        assert_eq!(stats.sample_size, 4);
        assert_approx(stats.success_rate, 0.5, 1e-12);
        assert_approx(stats.avg_return, (5.0 - 2.0 + 2.0 + 10.0) / 4.0, 1e-9);
    }

    #[test]
    fn empty_outcomes_are_zero() {
        let stats = pattern_stats(PatternKind::Doji, &[]);
        assert_eq!(stats.sample_size, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.avg_return, 0.0);
    }

    #[test]
    fn forward_outcomes_respect_horizon() {
        let bars = make_bars(&[10.0, 8.0, 11.0, 12.0, 13.0]);
        let matches = scan_patterns(&bars);
        let outcomes = forward_outcomes(&bars, &matches, PatternKind::BullishEngulfing, 2);
        // bar 2 (open 8, close 11) engulfs the bearish bar 1 (open 10, close 8)
        assert_eq!(outcomes, vec![(11.0, 13.0)]);

        let too_far = forward_outcomes(&bars, &matches, PatternKind::BullishEngulfing, 5);
        assert!(too_far.is_empty());
    }
}
