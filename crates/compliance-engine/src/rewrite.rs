//! Improved clause drafting
//!
//! The improved version is assembled from the original body and a fixed set
//! of canned sentences keyed by the gaps that were found. Placeholders such
//! as `[RATE]` are left in for the author to fill in.

use lazy_static::lazy_static;
use regex::Regex;

use crate::patterns::{compliance_footer, REWRITABLE_MODALS};

pub const PARTIES_PREFIX: &str = "The parties agree that ";

pub const NOTICE_PERIOD_SENTENCE: &str =
    "Either party may terminate this clause upon thirty (30) days prior written notice to the other party.";
pub const LIABILITY_CAP_SENTENCE: &str =
    "In no event shall either party's total liability exceed the total fees paid under this agreement in the twelve (12) months preceding the claim.";
pub const CURRENCY_SENTENCE: &str =
    "All amounts shall be paid in United States Dollars (USD) unless otherwise specified in writing.";
pub const CONFIDENTIALITY_SENTENCE: &str =
    "The receiving party shall maintain the confidentiality of all disclosed information for a period of five (5) years from the date of disclosure.";
pub const LATE_INTEREST_SENTENCE: &str =
    "Late payments shall incur interest at the rate of [RATE]% per annum.";

lazy_static! {
    static ref WEAK_MODAL: Regex =
        Regex::new(&format!(r"(?i)\b({})\b", REWRITABLE_MODALS.join("|"))).unwrap();

    /// Alternation binds loosely: `\bParty`, `parties`, `Company` or `Client\b`
    static ref PARTY_REFERENCE: Regex =
        Regex::new(r"(?i)\bParty|parties|Company|Client\b").unwrap();

    /// Canned sentence appended when any gap mentions the key
    static ref GAP_ADDITIONS: Vec<(&'static str, &'static str)> = vec![
        ("notice period", NOTICE_PERIOD_SENTENCE),
        ("limitation of liability", LIABILITY_CAP_SENTENCE),
        ("currency", CURRENCY_SENTENCE),
        ("confidentiality", CONFIDENTIALITY_SENTENCE),
    ];
}

/// Draft the improved clause: heading, strengthened body, additions, footer
pub fn generate_improved_clause(
    original: &str,
    heading: &str,
    clause_type: &str,
    issues: &[String],
    gaps: &[String],
) -> String {
    let mut improved = format!("{}\n\n", heading);
    improved.push_str(&enhance_original_text(original, issues));

    let additions = generate_additions(clause_type, gaps);
    if !additions.is_empty() {
        improved.push_str("\n\n");
        improved.push_str(&additions);
    }

    improved.push_str(compliance_footer(clause_type));
    improved
}

/// Strengthen weak modals and make sure the body names the parties
pub fn enhance_original_text(text: &str, issues: &[String]) -> String {
    let needs_strong_language = issues
        .iter()
        .any(|i| i.contains("legal terminology") || i.contains("weak"));

    let enhanced = if needs_strong_language {
        WEAK_MODAL.replace_all(text, "shall").into_owned()
    } else {
        text.to_string()
    };

    if PARTY_REFERENCE.is_match(&enhanced) {
        return enhanced;
    }

    format!("{}{}", PARTIES_PREFIX, lowercase_first(&enhanced))
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Canned sentences for the gaps found, joined by single spaces
pub fn generate_additions(clause_type: &str, gaps: &[String]) -> String {
    let mut additions: Vec<&str> = GAP_ADDITIONS
        .iter()
        .filter(|(key, _)| gaps.iter().any(|g| g.contains(key)))
        .map(|(_, sentence)| *sentence)
        .collect();

    if clause_type.to_lowercase().contains("payment") && !gaps.is_empty() {
        additions.push(LATE_INTEREST_SENTENCE);
    }

    additions.join(" ")
}
