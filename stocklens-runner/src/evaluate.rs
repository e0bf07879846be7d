//! Batch evaluation: quotes + history → scored, ranked snapshot.
//!
//! Symbols are independent, so they are evaluated in parallel with rayon.
//! A failing symbol is recorded in the snapshot and logged; it never aborts
//! the batch. Every call builds a fresh snapshot; nothing is updated in place.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use stocklens_core::indicators::calculate_indicators;
use stocklens_core::scoring::{filter_by_threshold, rank, ScoredEntity};
use stocklens_core::sector::{select_surging, summarize_all, SectorSummary, SurgingEntry};
use stocklens_core::InvalidInputError;
use thiserror::Error;

use crate::config::EvaluationConfig;
use crate::opinion::{resolve, OpinionSource};
use crate::provider::{DataError, QuoteProvider};
use crate::store::Watchlist;

#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("invalid input: {0}")]
    Invalid(#[from] InvalidInputError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolFailure {
    pub symbol: String,
    pub reason: String,
}

/// Result of one batch evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Hash of the configuration that produced this snapshot.
    pub config_hash: String,
    pub provider: String,
    /// Symbols scored successfully, before the `scan.min_score` cut.
    pub evaluated: usize,
    /// Scored entities at or above `scan.min_score`, best first.
    pub ranked: Vec<ScoredEntity>,
    /// Surging shortlist across the whole batch.
    pub surging: Vec<SurgingEntry>,
    pub sectors: Vec<SectorSummary>,
    pub failures: Vec<SymbolFailure>,
}

impl Snapshot {
    pub fn evaluated_count(&self) -> usize {
        self.evaluated
    }
}

/// Evaluate one symbol: quote, trailing history, indicators, optional
/// opinion, score. `sector` fills in the quote's sector when it has none.
pub fn evaluate_symbol(
    provider: &dyn QuoteProvider,
    opinions: Option<&dyn OpinionSource>,
    symbol: &str,
    sector: Option<&str>,
    history_days: usize,
) -> Result<ScoredEntity, EvaluateError> {
    let mut quote = provider.fetch_quote(symbol)?;
    if quote.sector.is_none() {
        quote.sector = sector.map(str::to_string);
    }
    let bars = provider.fetch_history(symbol, history_days)?;
    let indicators = calculate_indicators(&bars)?;
    let opinion = opinions.and_then(|source| resolve(symbol, source.opinion(symbol, &indicators)));

    let scored = ScoredEntity::new(quote.into_entity(), indicators, opinion);
    tracing::debug!(symbol, score = scored.score, bars = bars.len(), "scored");
    Ok(scored)
}

/// Evaluate every symbol in the configured universe.
pub fn evaluate_universe(
    provider: &dyn QuoteProvider,
    opinions: Option<&dyn OpinionSource>,
    config: &EvaluationConfig,
) -> Snapshot {
    let members: Vec<(String, Option<String>)> = config
        .universe
        .members()
        .into_iter()
        .map(|(symbol, sector)| (symbol.to_string(), Some(sector.to_string())))
        .collect();
    run_batch(provider, opinions, &members, config)
}

/// Evaluate a watchlist. Sectors come from the configured universe when the
/// symbol is listed there.
pub fn evaluate_watchlist(
    provider: &dyn QuoteProvider,
    opinions: Option<&dyn OpinionSource>,
    watchlist: &Watchlist,
    config: &EvaluationConfig,
) -> Snapshot {
    let members: Vec<(String, Option<String>)> = watchlist
        .symbols
        .iter()
        .map(|symbol| {
            let sector = config.universe.sector_of(symbol).map(str::to_string);
            (symbol.clone(), sector)
        })
        .collect();
    run_batch(provider, opinions, &members, config)
}

fn run_batch(
    provider: &dyn QuoteProvider,
    opinions: Option<&dyn OpinionSource>,
    members: &[(String, Option<String>)],
    config: &EvaluationConfig,
) -> Snapshot {
    let scan = &config.scan;
    let results: Vec<(String, Result<ScoredEntity, EvaluateError>)> = members
        .par_iter()
        .map(|(symbol, sector)| {
            let result = evaluate_symbol(
                provider,
                opinions,
                symbol,
                sector.as_deref(),
                scan.history_days,
            );
            (symbol.clone(), result)
        })
        .collect();

    let mut scored = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (symbol, result) in results {
        match result {
            Ok(entity) => scored.push(entity),
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "evaluation failed");
                failures.push(SymbolFailure {
                    symbol,
                    reason: e.to_string(),
                });
            }
        }
    }

    let sectors = summarize_all(&scored, scan.surging_limit);
    let surging = select_surging(&scored, scan.surging_limit);
    let ranked = filter_by_threshold(&rank(&scored), scan.min_score);

    tracing::info!(
        provider = provider.name(),
        evaluated = scored.len(),
        failed = failures.len(),
        ranked = ranked.len(),
        surging = surging.len(),
        sectors = sectors.len(),
        "batch evaluation complete"
    );

    Snapshot {
        config_hash: config.config_hash(),
        provider: provider.name().to_string(),
        evaluated: scored.len(),
        ranked,
        surging,
        sectors,
        failures,
    }
}
