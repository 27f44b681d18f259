//! Compliance scores and the keyword fallback
//!
//! The score is what the clause list shows next to each clause. When a
//! clause cannot be decoded for analysis, the fallback heuristic stands in
//! so the list still renders a verdict.

use serde_json::Value;
use shared_types::{ClauseAnalysis, RiskLevel, DEFAULT_HEADING};

/// Lowest score the analyzer path reports
pub const SCORE_FLOOR: u8 = 45;
const ISSUE_PENALTY: usize = 3;
const GAP_PENALTY: usize = 5;

/// Fallback flags bodies shorter than this many characters
pub const FALLBACK_MIN_CHARS: usize = 200;
/// Fallback score for a flagged clause
pub const FALLBACK_FLAGGED_SCORE: u8 = 65;
/// Fallback score for a clause that passes the heuristic
pub const FALLBACK_PASSING_SCORE: u8 = 90;

fn base_score(risk: RiskLevel) -> u8 {
    match risk {
        RiskLevel::Low => 90,
        RiskLevel::Medium => 75,
        RiskLevel::High => 60,
        RiskLevel::Critical => 45,
    }
}

/// Score a clause from its analysis: risk base less 3 per issue and 5 per gap
pub fn compliance_score(analysis: &ClauseAnalysis) -> u8 {
    let deduction =
        analysis.issues.len() * ISSUE_PENALTY + analysis.compliance_gaps.len() * GAP_PENALTY;
    let base = usize::from(base_score(analysis.risk_level));

    // Result lies in 45..=90, so the cast is lossless
    base.saturating_sub(deduction).max(usize::from(SCORE_FLOOR)) as u8
}

/// A clause needs attention at High risk or above, or with 3+ issues
pub fn is_low_compliance(analysis: &ClauseAnalysis) -> bool {
    analysis.risk_level >= RiskLevel::High || analysis.issues.len() >= 3
}

/// Keyword heuristic used when analysis is unavailable
pub fn fallback_flagged(body: &str) -> bool {
    body.chars().count() < FALLBACK_MIN_CHARS || !body.to_lowercase().contains("shall")
}

pub fn fallback_score(body: &str) -> u8 {
    if fallback_flagged(body) {
        FALLBACK_FLAGGED_SCORE
    } else {
        FALLBACK_PASSING_SCORE
    }
}

/// Pull a body out of an undecodable clause: string `content`, then string `text`
pub fn raw_body(value: &Value) -> &str {
    ["content", "text"]
        .iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

pub fn raw_heading(value: &Value) -> &str {
    value
        .get("heading")
        .and_then(Value::as_str)
        .filter(|h| !h.is_empty())
        .unwrap_or(DEFAULT_HEADING)
}

pub fn raw_clause_id(value: &Value) -> Option<String> {
    match value.get("clause_id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
