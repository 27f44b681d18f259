use lazy_static::lazy_static;
use regex::Regex;

pub const NO_DATA_PROTECTION: &str = "No reference to GDPR or data protection regulations";
pub const NO_CURRENCY: &str = "Currency not specified for international compliance";
pub const NO_LATE_PAYMENT_PENALTY: &str = "No late payment penalty specified";
pub const NO_NOTICE_PERIOD: &str = "No specific notice period defined";

lazy_static! {
    /// A digit count followed by a unit. Case-sensitive: "30 Days" does not match.
    static ref NOTICE_PERIOD_PATTERN: Regex = Regex::new(r"\d+\s*(day|week|month)").unwrap();
}

/// Type-gated regulatory checks
pub fn check_regulatory_compliance(text: &str, clause_type: &str) -> Vec<String> {
    let mut gaps = Vec::new();
    let text_lower = text.to_lowercase();
    let type_lower = clause_type.to_lowercase();

    if type_lower.contains("confidential") || type_lower.contains("data") {
        gaps.extend(check_data_protection(&text_lower));
    }

    if type_lower.contains("payment") {
        gaps.extend(check_payment_terms(&text_lower));
    }

    if type_lower.contains("terminat") {
        gaps.extend(check_notice_period(text));
    }

    gaps
}

fn check_data_protection(text_lower: &str) -> Option<String> {
    if text_lower.contains("gdpr") || text_lower.contains("data protection") {
        return None;
    }
    Some(NO_DATA_PROTECTION.to_string())
}

fn check_payment_terms(text_lower: &str) -> Vec<String> {
    let mut gaps = Vec::new();

    if !text_lower.contains("currency") {
        gaps.push(NO_CURRENCY.to_string());
    }

    if !text_lower.contains("late payment") && !text_lower.contains("interest") {
        gaps.push(NO_LATE_PAYMENT_PENALTY.to_string());
    }

    gaps
}

/// Runs on the original text, not the lower-cased copy
fn check_notice_period(text: &str) -> Option<String> {
    if NOTICE_PERIOD_PATTERN.is_match(text) {
        return None;
    }
    Some(NO_NOTICE_PERIOD.to_string())
}
