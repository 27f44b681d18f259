use lazy_static::lazy_static;
use regex::Regex;

/// Bodies shorter than this many characters are flagged as too brief
pub const MIN_CLAUSE_CHARS: usize = 150;

pub const TOO_BRIEF: &str = "Clause is too brief and lacks necessary detail";
pub const NO_SENTENCE_STRUCTURE: &str = "Clause lacks proper sentence structure";
pub const SINGLE_SENTENCE: &str = "Clause should contain multiple sentences for clarity";
pub const HAS_PLACEHOLDER: &str = "Contains placeholder text that needs to be specified";

lazy_static! {
    static ref SENTENCE_TERMINATOR: Regex = Regex::new(r"[.!?]").unwrap();
    static ref PLACEHOLDER_PATTERN: Regex = Regex::new(r"\[.*?\]").unwrap();
}

/// Check length, punctuation and leftover template placeholders
pub fn check_structure(text: &str) -> Vec<String> {
    let mut issues = Vec::new();

    if text.chars().count() < MIN_CLAUSE_CHARS {
        issues.push(TOO_BRIEF.to_string());
    }

    if !text.contains('.') {
        issues.push(NO_SENTENCE_STRUCTURE.to_string());
    }

    if sentence_count(text) < 2 {
        issues.push(SINGLE_SENTENCE.to_string());
    }

    if PLACEHOLDER_PATTERN.is_match(text) {
        issues.push(HAS_PLACEHOLDER.to_string());
    }

    issues
}

/// Count non-blank fragments between `.`, `!` and `?`
pub fn sentence_count(text: &str) -> usize {
    SENTENCE_TERMINATOR
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count()
}
