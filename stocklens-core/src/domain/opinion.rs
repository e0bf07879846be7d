//! External opinion: the buy/sell/hold view supplied by the hosted AI
//! collaborator. The core never produces one; it only consumes it.

use serde::{Deserialize, Serialize};

/// Direction of an external opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Buy,
    Sell,
    Hold,
}

impl Direction {
    /// Base value used by the opinion component of the composite score.
    pub fn base_score(self) -> f64 {
        match self {
            Self::Buy => 100.0,
            Self::Sell => 0.0,
            Self::Hold => 50.0,
        }
    }
}

/// One named factor behind an opinion. `impact` is in -100..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpinionFactor {
    pub name: String,
    pub impact: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalOpinion {
    pub direction: Direction,
    /// 0..=100
    pub confidence: f64,
    /// Expected return in percent, when the collaborator provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_return: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factors: Vec<OpinionFactor>,
}

impl ExternalOpinion {
    pub fn new(direction: Direction, confidence: f64) -> Self {
        Self {
            direction,
            confidence,
            expected_return: None,
            factors: Vec::new(),
        }
    }
}

/// Result of interpreting a raw collaborator response.
///
/// A `ParseError` is never fatal: scoring treats it exactly like a missing
/// opinion.
#[derive(Debug, Clone, PartialEq)]
pub enum OpinionParse {
    Parsed(ExternalOpinion),
    ParseError(String),
}

impl OpinionParse {
    pub fn opinion(&self) -> Option<&ExternalOpinion> {
        match self {
            Self::Parsed(op) => Some(op),
            Self::ParseError(_) => None,
        }
    }

    pub fn into_opinion(self) -> Option<ExternalOpinion> {
        match self {
            Self::Parsed(op) => Some(op),
            Self::ParseError(_) => None,
        }
    }
}
