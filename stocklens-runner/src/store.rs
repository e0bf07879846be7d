//! Key/value persistence seam.
//!
//! Watchlists and similar user state are keyed by a unique id. The trait
//! keeps evaluation code independent of where that state lives.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub trait KeyValueStore<V>: Send + Sync {
    fn get(&self, id: &str) -> Option<V>;

    /// Insert or replace; returns the previous value.
    fn put(&mut self, id: &str, value: V) -> Option<V>;

    /// Every entry, ordered by id.
    fn get_all(&self) -> Vec<(String, V)>;
}

/// In-memory store ordered by id.
#[derive(Debug, Clone)]
pub struct InMemoryStore<V> {
    entries: BTreeMap<String, V>,
}

impl<V> Default for InMemoryStore<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> InMemoryStore<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone + Send + Sync> KeyValueStore<V> for InMemoryStore<V> {
    fn get(&self, id: &str) -> Option<V> {
        self.entries.get(id).cloned()
    }

    fn put(&mut self, id: &str, value: V) -> Option<V> {
        self.entries.insert(id.to_string(), value)
    }

    fn get_all(&self) -> Vec<(String, V)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// A named list of symbols the user follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watchlist {
    pub name: String,
    pub symbols: Vec<String>,
}

impl Watchlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbols: Vec::new(),
        }
    }

    /// Add a symbol once; returns false when it was already present.
    pub fn add(&mut self, symbol: &str) -> bool {
        if self.contains(symbol) {
            return false;
        }
        self.symbols.push(symbol.to_string());
        true
    }

    pub fn remove(&mut self, symbol: &str) -> bool {
        let before = self.symbols.len();
        self.symbols.retain(|s| s != symbol);
        self.symbols.len() != before
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }
}
