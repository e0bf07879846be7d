//! Synthetic bars for demos and offline runs.
//!
//! A seeded random walk per symbol: the seed is BLAKE3(symbol), so the same
//! symbol always produces the same series. Clearly fake; never mix with real
//! data in one snapshot.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stocklens_core::domain::PriceBar;

use crate::provider::{DataError, Quote, QuoteProvider};

/// Generate `days` weekday bars ending on or before `end`.
pub fn generate_bars(symbol: &str, days: usize, end: NaiveDate) -> Vec<PriceBar> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut dates = Vec::with_capacity(days);
    let mut current = end;
    while dates.len() < days {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(current);
        }
        current -= Duration::days(1);
    }
    dates.reverse();

    // Per-symbol drift so a universe has both risers and fallers.
    let drift: f64 = rng.gen_range(-0.002..0.003);
    let mut price: f64 = rng.gen_range(20_000.0..200_000.0);

    dates
        .into_iter()
        .map(|date| {
            let daily_return: f64 = drift + rng.gen_range(-0.025..0.025);
            let open = price;
            let close = (price * (1.0 + daily_return)).max(1.0);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(200_000..3_000_000u64);
            price = close;
            PriceBar {
                time: date.and_hms_opt(15, 30, 0).unwrap_or_default(),
                open,
                high,
                low,
                close,
                volume,
            }
        })
        .collect()
}

/// Provider backed by [`generate_bars`].
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    /// Bars generated per symbol; histories are cut from this series.
    pub days: usize,
    pub end: NaiveDate,
}

impl SyntheticProvider {
    pub fn new(days: usize, end: NaiveDate) -> Self {
        Self { days, end }
    }
}

impl QuoteProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_quote(&self, symbol: &str) -> Result<Quote, DataError> {
        let bars = generate_bars(symbol, self.days, self.end);
        Quote::from_bars(symbol, &format!("SYN-{symbol}"), &bars).ok_or_else(|| {
            DataError::NoHistory {
                symbol: symbol.to_string(),
            }
        })
    }

    fn fetch_history(&self, symbol: &str, days: usize) -> Result<Vec<PriceBar>, DataError> {
        let bars = generate_bars(symbol, self.days, self.end);
        Ok(bars[bars.len().saturating_sub(days)..].to_vec())
    }
}
