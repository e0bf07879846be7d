//! Serializable evaluation configuration.
//!
//! Loaded from TOML with three sections:
//!
//! ```toml
//! [scan]
//! surging_limit = 5
//! min_score = 0.0
//! history_days = 250
//!
//! [alerts]
//! cooldown_secs = 3600
//! min_score = 70.0
//!
//! [universe.sectors]
//! "반도체" = ["005930", "000660"]
//! ```
//!
//! Every section and field is optional; missing values take the defaults.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("symbol '{symbol}' listed in both '{first}' and '{second}'")]
    DuplicateSymbol {
        symbol: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum surging entries per sector summary and in the overall shortlist.
    pub surging_limit: usize,
    /// Entities scoring below this are left out of the ranked output.
    pub min_score: f64,
    /// Trailing bars requested per symbol.
    pub history_days: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            surging_limit: 5,
            min_score: 0.0,
            history_days: 250,
        }
    }
}

/// Longest accepted alert cooldown (one year).
pub const MAX_COOLDOWN_SECS: u64 = 366 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlertConfig {
    /// Minimum time between two alerts for the same symbol.
    pub cooldown_secs: u64,
    /// Score an entity must reach before it can alert.
    pub min_score: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: 3600,
            min_score: 70.0,
        }
    }
}

/// Sector-organized symbol lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UniverseConfig {
    pub sectors: BTreeMap<String, Vec<String>>,
}

impl UniverseConfig {
    /// Every symbol with its sector, in sector then listing order.
    pub fn members(&self) -> Vec<(&str, &str)> {
        self.sectors
            .iter()
            .flat_map(|(sector, symbols)| symbols.iter().map(move |s| (s.as_str(), sector.as_str())))
            .collect()
    }

    pub fn sector_of(&self, symbol: &str) -> Option<&str> {
        self.sectors
            .iter()
            .find(|(_, symbols)| symbols.iter().any(|s| s == symbol))
            .map(|(sector, _)| sector.as_str())
    }

    pub fn symbol_count(&self) -> usize {
        self.sectors.values().map(|v| v.len()).sum()
    }

    /// A small KOSPI universe for demos and synthetic runs.
    pub fn default_kr() -> Self {
        let mut sectors = BTreeMap::new();
        for (sector, symbols) in [
            ("반도체", &["005930", "000660", "042700"][..]),
            ("바이오", &["207940", "068270", "326030"][..]),
            ("자동차", &["005380", "000270", "012330"][..]),
            ("2차전지", &["373220", "006400", "247540"][..]),
        ] {
            sectors.insert(
                sector.to_string(),
                symbols.iter().map(|s| s.to_string()).collect(),
            );
        }
        Self { sectors }
    }
}

/// Complete configuration for one evaluation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvaluationConfig {
    pub scan: ScanConfig,
    pub alerts: AlertConfig,
    pub universe: UniverseConfig,
}

impl EvaluationConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.history_days == 0 {
            return Err(ConfigError::Invalid {
                field: "scan.history_days",
                reason: "must be at least 1".into(),
            });
        }
        if self.alerts.cooldown_secs > MAX_COOLDOWN_SECS {
            return Err(ConfigError::Invalid {
                field: "alerts.cooldown_secs",
                reason: format!(
                    "must be at most {MAX_COOLDOWN_SECS}, got {}",
                    self.alerts.cooldown_secs
                ),
            });
        }
        for (field, value) in [
            ("scan.min_score", self.scan.min_score),
            ("alerts.min_score", self.alerts.min_score),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be within 0..=100, got {value}"),
                });
            }
        }

        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for (sector, symbols) in &self.universe.sectors {
            if sector.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "universe.sectors",
                    reason: "sector name is empty".into(),
                });
            }
            let mut in_sector = HashSet::new();
            for symbol in symbols {
                if symbol.trim().is_empty() {
                    return Err(ConfigError::Invalid {
                        field: "universe.sectors",
                        reason: format!("empty symbol in '{sector}'"),
                    });
                }
                if !in_sector.insert(symbol.as_str()) {
                    continue;
                }
                if let Some(first) = seen.insert(symbol.as_str(), sector.as_str()) {
                    return Err(ConfigError::DuplicateSymbol {
                        symbol: symbol.clone(),
                        first: first.to_string(),
                        second: sector.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Deterministic BLAKE3 hash over every setting, used to tag snapshots.
    pub fn config_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.scan.surging_limit as u64).to_le_bytes());
        hasher.update(&self.scan.min_score.to_le_bytes());
        hasher.update(&(self.scan.history_days as u64).to_le_bytes());
        hasher.update(&self.alerts.cooldown_secs.to_le_bytes());
        hasher.update(&self.alerts.min_score.to_le_bytes());
        for (sector, symbols) in &self.universe.sectors {
            hasher.update(sector.as_bytes());
            hasher.update(&[0]);
            for symbol in symbols {
                hasher.update(symbol.as_bytes());
                hasher.update(&[1]);
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}
