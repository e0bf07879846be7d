//! Scoring Engine.
//!
//! Blends the technical composite, an optional external opinion and price /
//! volume momentum into one bounded score, then ranks and filters collections
//! of scored entities.

pub mod category;
pub mod engine;
pub mod ranking;

pub use category::ScoreCategory;
pub use engine::{
    evaluate, momentum_component, opinion_component, score, score_breakdown, ScoreBreakdown,
    ScoredEntity, MOMENTUM_WEIGHT, OPINION_WEIGHT, TECHNICAL_WEIGHT,
};
pub use ranking::{filter_by_threshold, rank};
