//! Clause type detection

use crate::patterns::{CLAUSE_TYPE_PATTERNS, GENERAL_PROVISION};

/// Detect the clause type from its body and heading.
///
/// Types are tried in table order and the first one with any matching
/// pattern wins, so a clause mentioning both termination and fees is a
/// Termination clause.
pub fn detect_clause_type(text: &str, heading: &str) -> &'static str {
    let combined = format!("{} {}", text, heading).to_lowercase();

    CLAUSE_TYPE_PATTERNS
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(&combined)))
        .map(|(name, _)| *name)
        .unwrap_or(GENERAL_PROVISION)
}
