//! Keyword lists and lookup tables for clause analysis
//!
//! All tables are ordered slices of `(key, value)` pairs. Order matters:
//! clause type detection returns the first type whose patterns match.

use lazy_static::lazy_static;
use regex::Regex;

/// Type name used when no pattern in [`CLAUSE_TYPE_PATTERNS`] matches
pub const GENERAL_PROVISION: &str = "General Provision";

/// Terms that mark binding, enforceable drafting
pub const STRONG_LEGAL_TERMS: &[&str] = &[
    "shall",
    "must",
    "will",
    "hereby",
    "notwithstanding",
    "pursuant to",
    "in accordance with",
    "subject to",
    "provided that",
    "reasonable",
    "material",
];

/// Permissive or tentative terms
pub const WEAK_TERMS: &[&str] = &["may", "might", "could", "should", "try", "attempt"];

/// Standards that need a definition to be enforceable
pub const VAGUE_TERMS: &[&str] = &["reasonable", "appropriate", "timely", "promptly"];

/// Weak modals rewritten to "shall" when drafting an improved clause
pub const REWRITABLE_MODALS: &[&str] = &["may", "should", "could", "might"];

/// Elements each clause type is expected to cover, keyed by lower-cased type name
pub const REQUIRED_ELEMENTS: &[(&str, &[&str])] = &[
    (
        "termination",
        &[
            "notice period",
            "termination conditions",
            "consequences of termination",
        ],
    ),
    (
        "liability",
        &[
            "limitation of liability",
            "cap on damages",
            "indemnification",
        ],
    ),
    (
        "payment",
        &[
            "payment terms",
            "late payment penalties",
            "currency",
            "method of payment",
        ],
    ),
    (
        "confidentiality",
        &[
            "duration of confidentiality",
            "exceptions to confidentiality",
            "return of materials",
        ],
    ),
    (
        "intellectual property",
        &["ownership rights", "license grants", "restrictions on use"],
    ),
    (
        "warranties",
        &["warranty scope", "warranty duration", "warranty disclaimers"],
    ),
];

/// Closing paragraph appended to an improved clause, keyed by exact type name
pub const COMPLIANCE_FOOTERS: &[(&str, &str)] = &[
    (
        "Payment",
        "\n\nThis clause complies with international payment standards and includes provisions for late payment interest at the statutory rate.",
    ),
    (
        "Confidentiality",
        "\n\nThis clause meets GDPR and data protection requirements for handling confidential information.",
    ),
    (
        "Termination",
        "\n\nThis termination provision includes adequate notice requirements and complies with applicable contract law.",
    ),
    (
        "Liability",
        "\n\nThis limitation of liability clause is enforceable under common law and includes appropriate caps on damages.",
    ),
];

lazy_static! {
    /// Clause type detection table, in priority order
    pub static ref CLAUSE_TYPE_PATTERNS: Vec<(&'static str, Vec<Regex>)> = vec![
        (
            "Termination",
            compile(&[r"terminat(e|ion)", r"cancellation", r"expir(y|ation)"]),
        ),
        (
            "Liability",
            compile(&[
                r"liabilit(y|ies)",
                r"indemnif(y|ication)",
                r"damages",
                r"limitation.*liability",
            ]),
        ),
        (
            "Payment",
            compile(&[r"payment", r"fee(s)?", r"invoice", r"compensation", r"pricing"]),
        ),
        (
            "Confidentiality",
            compile(&[r"confidential", r"proprietary", r"nda", r"non-disclosure"]),
        ),
        (
            "Intellectual Property",
            compile(&[
                r"intellectual property",
                r"\bip\b",
                r"copyright",
                r"trademark",
                r"patent",
                r"ownership",
            ]),
        ),
        (
            "Warranties",
            compile(&[r"warrant(y|ies)", r"represent(ation)?", r"guarantee"]),
        ),
        (
            "Force Majeure",
            compile(&[r"force majeure", r"act of god", r"unforeseeable"]),
        ),
        (
            "Governing Law",
            compile(&[r"governing law", r"jurisdiction", r"dispute resolution"]),
        ),
    ];
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
        .collect()
}

/// Look up the required elements for a clause type (case-insensitive)
pub fn required_elements(clause_type: &str) -> &'static [&'static str] {
    let key = clause_type.to_lowercase();
    REQUIRED_ELEMENTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, elements)| *elements)
        .unwrap_or(&[])
}

/// Look up the compliance footer for a clause type (exact match)
pub fn compliance_footer(clause_type: &str) -> &'static str {
    COMPLIANCE_FOOTERS
        .iter()
        .find(|(name, _)| *name == clause_type)
        .map(|(_, footer)| *footer)
        .unwrap_or("")
}

/// True if the lower-cased text contains any of the terms as a substring
pub fn contains_any(text_lower: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text_lower.contains(term))
}

/// Number of distinct terms present in the lower-cased text
pub fn count_present(text_lower: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| text_lower.contains(*term)).count()
}
