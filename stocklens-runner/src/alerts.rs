//! Alert gating: per-symbol cooldowns and a suspended set.
//!
//! The gate owns all notification state. Time comes from an injected
//! [`Clock`] so cooldowns are testable without sleeping.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use stocklens_core::scoring::ScoredEntity;

use crate::config::{AlertConfig, MAX_COOLDOWN_SECS};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertDecision {
    Send,
    Suspended,
    BelowThreshold { score: f64 },
    CoolingDown { remaining_secs: i64 },
}

impl AlertDecision {
    pub fn is_send(&self) -> bool {
        matches!(self, Self::Send)
    }
}

pub struct AlertGate<C: Clock> {
    clock: C,
    cooldown: Duration,
    min_score: f64,
    last_sent: HashMap<String, DateTime<Utc>>,
    suspended: HashSet<String>,
}

impl<C: Clock> AlertGate<C> {
    pub fn new(clock: C, cooldown: Duration, min_score: f64) -> Self {
        Self {
            clock,
            cooldown,
            min_score,
            last_sent: HashMap::new(),
            suspended: HashSet::new(),
        }
    }

    /// Cooldowns longer than [`MAX_COOLDOWN_SECS`] are capped.
    pub fn from_config(clock: C, config: &AlertConfig) -> Self {
        let secs = config.cooldown_secs.min(MAX_COOLDOWN_SECS) as i64;
        Self::new(clock, Duration::seconds(secs), config.min_score)
    }

    pub fn suspend(&mut self, symbol: &str) {
        self.suspended.insert(symbol.to_string());
    }

    pub fn resume(&mut self, symbol: &str) -> bool {
        self.suspended.remove(symbol)
    }

    pub fn is_suspended(&self, symbol: &str) -> bool {
        self.suspended.contains(symbol)
    }

    /// What would happen for `entity` right now, without recording anything.
    pub fn evaluate(&self, entity: &ScoredEntity) -> AlertDecision {
        let symbol = entity.symbol();
        if entity.entity.suspended || self.is_suspended(symbol) {
            return AlertDecision::Suspended;
        }
        if entity.score < self.min_score {
            return AlertDecision::BelowThreshold {
                score: entity.score,
            };
        }
        if let Some(&sent) = self.last_sent.get(symbol) {
            let elapsed = self.clock.now() - sent;
            if elapsed < self.cooldown {
                return AlertDecision::CoolingDown {
                    remaining_secs: (self.cooldown - elapsed).num_seconds(),
                };
            }
        }
        AlertDecision::Send
    }

    /// Decide and, on `Send`, start the symbol's cooldown.
    pub fn check(&mut self, entity: &ScoredEntity) -> AlertDecision {
        let decision = self.evaluate(entity);
        if decision.is_send() {
            self.last_sent
                .insert(entity.symbol().to_string(), self.clock.now());
        }
        decision
    }

    /// Run a ranked batch through the gate; returns the entities to notify.
    pub fn filter<'a>(&mut self, entities: &'a [ScoredEntity]) -> Vec<&'a ScoredEntity> {
        entities
            .iter()
            .filter(|e| {
                let decision = self.check(e);
                tracing::debug!(symbol = e.symbol(), ?decision, "alert gate");
                decision.is_send()
            })
            .collect()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
