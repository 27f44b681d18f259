use crate::patterns::{contains_any, count_present, STRONG_LEGAL_TERMS, VAGUE_TERMS, WEAK_TERMS};

pub const LACKS_STRONG_TERMS: &str =
    "Lacks strong legal terminology (e.g., 'shall', 'must', 'hereby')";
pub const WEAK_LANGUAGE: &str = "Contains weak or ambiguous language that reduces enforceability";
pub const VAGUE_TERMS_UNDEFINED: &str = "Uses vague terms without clear definitions";

/// More distinct weak terms than this raises an issue
pub const MAX_WEAK_TERMS: usize = 2;

/// Check how binding the drafting is.
///
/// Terms are matched as substrings of the lower-cased body, so "will"
/// also matches "willing" and "try" matches "country".
pub fn check_legal_language(text: &str) -> Vec<String> {
    let mut issues = Vec::new();
    let text_lower = text.to_lowercase();

    if !contains_any(&text_lower, STRONG_LEGAL_TERMS) {
        issues.push(LACKS_STRONG_TERMS.to_string());
    }

    if count_present(&text_lower, WEAK_TERMS) > MAX_WEAK_TERMS {
        issues.push(WEAK_LANGUAGE.to_string());
    }

    if contains_any(&text_lower, VAGUE_TERMS) && !text_lower.contains("defined as") {
        issues.push(VAGUE_TERMS_UNDEFINED.to_string());
    }

    issues
}
