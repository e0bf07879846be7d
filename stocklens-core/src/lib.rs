//! StockLens Core: domain types, indicators, candlestick patterns, scoring
//! and sector aggregation.
//!
//! Everything here is a pure function of its inputs:
//! - Domain types (price bars, entities, external opinions)
//! - Indicator library (SMA, EMA, RSI, MACD, Bollinger) and the per-bar snapshot
//! - Technical rubric and the weighted composite score
//! - Candlestick pattern detection with forward-outcome statistics
//! - Sector trend classification and surging selection
//!
//! No I/O, no clocks, no shared mutable state. Callers own concurrency.

pub mod domain;
pub mod error;
pub mod indicators;
pub mod patterns;
pub mod scoring;
pub mod sector;

pub use error::InvalidInputError;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: every public value type is Send + Sync so the
    /// runner can fan evaluations out across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::Entity>();
        require_sync::<domain::Entity>();
        require_send::<domain::ExternalOpinion>();
        require_sync::<domain::ExternalOpinion>();
        require_send::<domain::OpinionParse>();
        require_sync::<domain::OpinionParse>();

        // Indicator outputs
        require_send::<indicators::IndicatorSet>();
        require_sync::<indicators::IndicatorSet>();
        require_send::<indicators::TechnicalBreakdown>();
        require_sync::<indicators::TechnicalBreakdown>();
        require_send::<indicators::FactorSignal>();
        require_sync::<indicators::FactorSignal>();

        // Patterns
        require_send::<patterns::PatternMatch>();
        require_sync::<patterns::PatternMatch>();
        require_send::<patterns::PatternStats>();
        require_sync::<patterns::PatternStats>();

        // Scoring and sectors
        require_send::<scoring::ScoredEntity>();
        require_sync::<scoring::ScoredEntity>();
        require_send::<scoring::ScoreBreakdown>();
        require_sync::<scoring::ScoreBreakdown>();
        require_send::<sector::SectorSummary>();
        require_sync::<sector::SectorSummary>();
        require_send::<sector::SurgingEntry>();
        require_sync::<sector::SurgingEntry>();

        require_send::<InvalidInputError>();
        require_sync::<InvalidInputError>();
    }
}
