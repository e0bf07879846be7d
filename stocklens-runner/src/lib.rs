//! StockLens Runner: batch evaluation, configuration and collaborator seams.
//!
//! This crate builds on `stocklens-core` to provide:
//! - TOML configuration with validation and a deterministic hash
//! - Quote providers (CSV directory, synthetic, in-memory)
//! - Opinion source seam with lenient response parsing
//! - Key/value store seam for watchlists
//! - Alert gate with per-symbol cooldowns and an injected clock
//! - Parallel universe evaluation into ranked snapshots

pub mod alerts;
pub mod config;
pub mod evaluate;
pub mod opinion;
pub mod provider;
pub mod store;
pub mod synthetic;

pub use alerts::{AlertDecision, AlertGate, Clock, ManualClock, SystemClock};
pub use config::{AlertConfig, ConfigError, EvaluationConfig, ScanConfig, UniverseConfig};
pub use evaluate::{
    evaluate_symbol, evaluate_universe, evaluate_watchlist, EvaluateError, Snapshot, SymbolFailure,
};
pub use opinion::{parse_opinion, FixedOpinionSource, OpinionSource};
pub use provider::{read_bars, write_bars, CsvProvider, DataError, InMemoryProvider, Quote, QuoteProvider};
pub use store::{InMemoryStore, KeyValueStore, Watchlist};
pub use synthetic::{generate_bars, SyntheticProvider};
