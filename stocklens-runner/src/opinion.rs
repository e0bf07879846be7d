//! Opinion source seam and lenient parsing of collaborator responses.
//!
//! The hosted collaborator answers in loosely formatted JSON: often wrapped
//! in a markdown code fence, sometimes with lowercase directions or
//! out-of-range confidence. [`parse_opinion`] normalizes all of that and
//! reports anything else as [`OpinionParse::ParseError`] carrying the raw
//! text.

use serde::Deserialize;
use std::collections::HashMap;
use stocklens_core::domain::{Direction, ExternalOpinion, OpinionFactor, OpinionParse};
use stocklens_core::indicators::IndicatorSet;

/// Anything that can produce an opinion for a symbol given its snapshot.
pub trait OpinionSource: Send + Sync {
    fn opinion(&self, symbol: &str, indicators: &IndicatorSet) -> OpinionParse;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOpinion {
    direction: String,
    confidence: f64,
    #[serde(default, alias = "expected_return")]
    expected_return: Option<f64>,
    #[serde(default)]
    factors: Vec<RawFactor>,
}

#[derive(Debug, Deserialize)]
struct RawFactor {
    name: String,
    #[serde(default)]
    impact: f64,
    #[serde(default)]
    description: String,
}

fn parse_direction(value: &str) -> Option<Direction> {
    match value.trim().to_ascii_uppercase().as_str() {
        "BUY" => Some(Direction::Buy),
        "SELL" => Some(Direction::Sell),
        "HOLD" => Some(Direction::Hold),
        _ => None,
    }
}

/// Body of the first fenced block, or the whole text when unfenced.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let after_open = &trimmed[start + 3..];
    // Optional language tag (```json); only word characters count.
    let tag_len = after_open
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(after_open.len());
    let body = &after_open[tag_len..];
    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Interpret a raw collaborator response.
pub fn parse_opinion(text: &str) -> OpinionParse {
    let body = strip_code_fence(text);
    let raw: RawOpinion = match serde_json::from_str(body) {
        Ok(raw) => raw,
        Err(_) => return OpinionParse::ParseError(text.to_string()),
    };
    let Some(direction) = parse_direction(&raw.direction) else {
        return OpinionParse::ParseError(text.to_string());
    };

    OpinionParse::Parsed(ExternalOpinion {
        direction,
        confidence: raw.confidence.clamp(0.0, 100.0),
        expected_return: raw.expected_return,
        factors: raw
            .factors
            .into_iter()
            .map(|f| OpinionFactor {
                name: f.name,
                impact: f.impact.clamp(-100.0, 100.0),
                description: f.description,
            })
            .collect(),
    })
}

/// Parse result with the failure logged and dropped.
pub fn resolve(symbol: &str, parse: OpinionParse) -> Option<ExternalOpinion> {
    if let OpinionParse::ParseError(raw) = &parse {
        tracing::warn!(
            symbol,
            raw_len = raw.len(),
            "unparseable opinion response, scoring without it"
        );
    }
    parse.into_opinion()
}

/// Returns canned responses per symbol, parsed on every call.
#[derive(Debug, Clone, Default)]
pub struct FixedOpinionSource {
    responses: HashMap<String, String>,
}

impl FixedOpinionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, symbol: impl Into<String>, raw: impl Into<String>) -> Self {
        self.responses.insert(symbol.into(), raw.into());
        self
    }
}

impl OpinionSource for FixedOpinionSource {
    fn opinion(&self, symbol: &str, _indicators: &IndicatorSet) -> OpinionParse {
        match self.responses.get(symbol) {
            Some(raw) => parse_opinion(raw),
            None => OpinionParse::ParseError(String::new()),
        }
    }
}
