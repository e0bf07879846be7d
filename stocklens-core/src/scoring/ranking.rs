//! Ranking and threshold filtering over scored snapshots.
//!
//! Both functions leave their input untouched and return a new list.

use super::engine::ScoredEntity;

/// Stable sort, highest score first. Ties keep their input order.
pub fn rank(entities: &[ScoredEntity]) -> Vec<ScoredEntity> {
    let mut ranked = entities.to_vec();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Keep entities with `score >= min_score`, preserving order.
pub fn filter_by_threshold(entities: &[ScoredEntity], min_score: f64) -> Vec<ScoredEntity> {
    entities
        .iter()
        .filter(|e| e.score >= min_score)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entity;
    use crate::indicators::IndicatorSet;

    fn scored(symbol: &str, score: f64) -> ScoredEntity {
        ScoredEntity {
            entity: Entity::new(symbol, symbol, 10.0),
            indicators: IndicatorSet::from_series(&[10.0], &[1000.0]),
            opinion: None,
            score,
        }
    }

    #[test]
    fn rank_descending_and_stable() {
        let input = vec![
            scored("A", 55.0),
            scored("B", 80.0),
            scored("C", 55.0),
            scored("D", 70.0),
        ];
        let ranked = rank(&input);
        let order: Vec<&str> = ranked.iter().map(|e| e.symbol()).collect();
        assert_eq!(order, vec!["B", "D", "A", "C"]);
        // input untouched
        assert_eq!(input[0].symbol(), "A");
    }

    #[test]
    fn filter_keeps_scores_at_threshold() {
        let input = vec![scored("A", 59.9), scored("B", 60.0), scored("C", 75.0)];
        let kept = filter_by_threshold(&input, 60.0);
        let symbols: Vec<&str> = kept.iter().map(|e| e.symbol()).collect();
        assert_eq!(symbols, vec!["B", "C"]);
    }

    #[test]
    fn empty_inputs() {
        assert!(rank(&[]).is_empty());
        assert!(filter_by_threshold(&[], 0.0).is_empty());
    }
}
