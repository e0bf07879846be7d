//! Quote provider trait and structured error types.
//!
//! The QuoteProvider trait abstracts over market data sources so the batch
//! evaluator can run against CSV exports, synthetic bars or test doubles
//! without knowing which.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use stocklens_core::domain::{Entity, PriceBar};
use stocklens_core::InvalidInputError;
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no price history for '{symbol}'")]
    NoHistory { symbol: String },

    #[error("read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("bad timestamp '{value}' in '{path}'")]
    BadTimestamp { path: String, value: String },

    #[error("invalid series: {0}")]
    Invalid(#[from] InvalidInputError),
}

/// Latest quote for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
    pub volume: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default)]
    pub suspended: bool,
}

impl Quote {
    /// Build a quote from the last two bars of a series. A single bar has no
    /// change.
    pub fn from_bars(symbol: &str, name: &str, bars: &[PriceBar]) -> Option<Self> {
        let last = bars.last()?;
        let change_percent = match bars.len() {
            0 | 1 => 0.0,
            n => {
                let prev = bars[n - 2].close;
                (last.close - prev) / prev * 100.0
            }
        };
        Some(Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price: last.close,
            change_percent,
            volume: last.volume,
            sector: None,
            suspended: false,
        })
    }

    pub fn into_entity(self) -> Entity {
        Entity {
            symbol: self.symbol,
            name: self.name,
            price: self.price,
            change_percent: self.change_percent,
            volume: self.volume,
            sector: self.sector,
            suspended: self.suspended,
        }
    }
}

/// Trait for quote providers.
///
/// Implementations handle the specifics of a source. Callers treat every
/// failure as per-symbol: one bad symbol never aborts a batch.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    fn fetch_quote(&self, symbol: &str) -> Result<Quote, DataError>;

    /// Up to `days` most recent bars, oldest first.
    fn fetch_history(&self, symbol: &str, days: usize) -> Result<Vec<PriceBar>, DataError>;
}

fn tail(bars: &[PriceBar], days: usize) -> Vec<PriceBar> {
    bars[bars.len().saturating_sub(days)..].to_vec()
}

/// Test double holding quotes and histories in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    quotes: HashMap<String, Quote>,
    histories: HashMap<String, Vec<PriceBar>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, quote: Quote, history: Vec<PriceBar>) {
        self.histories.insert(quote.symbol.clone(), history);
        self.quotes.insert(quote.symbol.clone(), quote);
    }

    pub fn with(mut self, quote: Quote, history: Vec<PriceBar>) -> Self {
        self.insert(quote, history);
        self
    }
}

impl QuoteProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn fetch_quote(&self, symbol: &str) -> Result<Quote, DataError> {
        self.quotes
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }

    fn fetch_history(&self, symbol: &str, days: usize) -> Result<Vec<PriceBar>, DataError> {
        let bars = self
            .histories
            .get(symbol)
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })?;
        Ok(tail(bars, days))
    }
}

/// One CSV row: `date,open,high,low,close,volume`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Accepts `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.
fn parse_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Reads `<dir>/<SYMBOL>.csv` files with a header row.
///
/// The quote is derived from the last two bars of the file; the symbol
/// doubles as the display name.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    /// Load and validate the full file for `symbol`.
    pub fn load(&self, symbol: &str) -> Result<Vec<PriceBar>, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let bars = read_bars(&path)?;
        if bars.is_empty() {
            return Err(DataError::NoHistory {
                symbol: symbol.to_string(),
            });
        }
        stocklens_core::domain::validate_series(&bars)?;
        Ok(bars)
    }
}

/// Parse a bar CSV file.
pub fn read_bars(path: &Path) -> Result<Vec<PriceBar>, DataError> {
    let display = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|source| DataError::Csv {
        path: display.clone(),
        source,
    })?;

    let mut bars = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row.map_err(|source| DataError::Csv {
            path: display.clone(),
            source,
        })?;
        let time = parse_time(&row.date).ok_or_else(|| DataError::BadTimestamp {
            path: display.clone(),
            value: row.date.clone(),
        })?;
        bars.push(PriceBar {
            time,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }
    Ok(bars)
}

/// Write bars in the format [`read_bars`] accepts.
pub fn write_bars(path: &Path, bars: &[PriceBar]) -> Result<(), DataError> {
    let display = path.display().to_string();
    let csv_err = |source| DataError::Csv {
        path: display.clone(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer
        .write_record(["date", "open", "high", "low", "close", "volume"])
        .map_err(csv_err)?;
    for bar in bars {
        writer
            .write_record([
                bar.time.format("%Y-%m-%d %H:%M:%S").to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
            ])
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| DataError::Io {
        path: display.clone(),
        source,
    })?;
    Ok(())
}

impl QuoteProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch_quote(&self, symbol: &str) -> Result<Quote, DataError> {
        let bars = self.load(symbol)?;
        Quote::from_bars(symbol, symbol, &bars).ok_or_else(|| DataError::NoHistory {
            symbol: symbol.to_string(),
        })
    }

    fn fetch_history(&self, symbol: &str, days: usize) -> Result<Vec<PriceBar>, DataError> {
        Ok(tail(&self.load(symbol)?, days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let base = NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar {
                time: base + chrono::Duration::days(i as i64),
                open: c,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
                volume: 1000 + i as u64,
            })
            .collect()
    }

    #[test]
    fn quote_from_last_two_bars() {
        let q = Quote::from_bars("A", "Alpha", &bars(&[100.0, 102.0])).unwrap();
        assert_eq!(q.price, 102.0);
        assert!((q.change_percent - 2.0).abs() < 1e-12);
        assert_eq!(q.volume, 1001);

        let single = Quote::from_bars("A", "Alpha", &bars(&[100.0])).unwrap();
        assert_eq!(single.change_percent, 0.0);
        assert!(Quote::from_bars("A", "Alpha", &[]).is_none());
    }

    #[test]
    fn in_memory_history_is_trailing() {
        let history = bars(&[1.0, 2.0, 3.0, 4.0]);
        let quote = Quote::from_bars("A", "A", &history).unwrap();
        let provider = InMemoryProvider::new().with(quote, history);
        let last_two = provider.fetch_history("A", 2).unwrap();
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].close, 3.0);
        assert_eq!(provider.fetch_history("A", 10).unwrap().len(), 4);
        assert!(matches!(
            provider.fetch_quote("B"),
            Err(DataError::SymbolNotFound { .. })
        ));
    }

    #[test]
    fn parses_both_timestamp_forms() {
        assert!(parse_time("2024-05-02").is_some());
        assert!(parse_time("2024-05-02 15:30:00").is_some());
        assert!(parse_time("05/02/2024").is_none());
    }
}
