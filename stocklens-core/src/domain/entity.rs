//! Entity: a quoted instrument before any score is attached.

use serde::{Deserialize, Serialize};

/// A stock or other instrument built from an external quote.
///
/// Scores and indicators are attached by the scoring engine; they are not
/// part of the entity itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
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

impl Entity {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            change_percent: 0.0,
            volume: 0,
            sector: None,
            suspended: false,
        }
    }

    pub fn with_change(mut self, change_percent: f64) -> Self {
        self.change_percent = change_percent;
        self
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Whether this entity carries the given sector tag.
    pub fn in_sector(&self, category: &str) -> bool {
        self.sector.as_deref() == Some(category)
    }
}
