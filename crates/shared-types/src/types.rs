use std::fmt;

/// Heading used when a clause arrives without one
pub const DEFAULT_HEADING: &str = "Untitled";

/// Heading used by the copilot when the first line of a clause is blank
pub const DEFAULT_COPILOT_HEADING: &str = "Clause";

/// A contract clause as it arrives from the editor or extraction pipeline.
///
/// Every field is optional. Only `heading`, `text` and `content` feed the
/// analyzer; the rest are carried through for display.
///
/// The display-only fields decode leniently: a value of the wrong type
/// becomes `None` instead of failing the whole clause.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Clause {
    #[serde(deserialize_with = "lenient::id")]
    pub clause_id: Option<String>, // Numeric ids are kept as text
    pub heading: Option<String>,
    pub text: Option<String>,
    pub content: Option<String>, // Takes precedence over `text`
    #[serde(deserialize_with = "lenient::level")]
    pub level: Option<u32>,
    #[serde(rename = "type", deserialize_with = "lenient::label")]
    pub clause_type: Option<String>, // Extractor's label, not the analyzer's
    #[serde(deserialize_with = "lenient::number")]
    pub confidence: Option<f64>,
}

mod lenient {
    use serde::{de::IgnoredAny, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Other(IgnoredAny),
    }

    fn loose<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Loose>, D::Error> {
        Option::<Loose>::deserialize(d)
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match loose(d)? {
            Some(Loose::Text(s)) => Some(s),
            Some(Loose::Unsigned(n)) => Some(n.to_string()),
            Some(Loose::Signed(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn level<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match loose(d)? {
            Some(Loose::Unsigned(n)) => u32::try_from(n).ok(),
            _ => None,
        })
    }

    pub fn label<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match loose(d)? {
            Some(Loose::Text(s)) => Some(s),
            _ => None,
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match loose(d)? {
            Some(Loose::Unsigned(n)) => Some(n as f64),
            Some(Loose::Signed(n)) => Some(n as f64),
            Some(Loose::Float(n)) => Some(n),
            _ => None,
        })
    }
}

impl Clause {
    pub fn new(heading: &str, text: &str) -> Self {
        Self {
            heading: Some(heading.to_string()),
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Build the clause the copilot analyzes from a raw clause body.
    ///
    /// The heading is the first line of the body, or "Clause" when that
    /// line is empty.
    pub fn from_copilot_text(clause_id: Option<String>, text: &str) -> Self {
        let first_line = text.split('\n').next().unwrap_or_default();
        let heading = if first_line.is_empty() {
            DEFAULT_COPILOT_HEADING
        } else {
            first_line
        };

        Self {
            clause_id,
            heading: Some(heading.to_string()),
            text: Some(text.to_string()),
            content: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Clause body: `content` if non-empty, else `text`, else empty
    pub fn body(&self) -> &str {
        [self.content.as_deref(), self.text.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn heading_or_default(&self) -> &str {
        match self.heading.as_deref() {
            Some(h) if !h.is_empty() => h,
            _ => DEFAULT_HEADING,
        }
    }
}

/// Four-step risk scale, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Map the combined issue and gap count onto the risk scale.
    ///
    /// 0-1 Low, 2-3 Medium, 4-5 High, 6 and above Critical.
    pub fn from_problem_count(total: usize) -> Self {
        match total {
            n if n >= 6 => RiskLevel::Critical,
            n if n >= 4 => RiskLevel::High,
            n if n >= 2 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analyzing one clause. Built fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseAnalysis {
    pub clause_type: String,
    pub issues: Vec<String>,
    pub risk_level: RiskLevel,
    pub compliance_gaps: Vec<String>,
    pub recommendations: Vec<String>,
    pub improved_version: String,
    pub analysis_steps: Vec<String>,
}

impl ClauseAnalysis {
    pub fn problem_count(&self) -> usize {
        self.issues.len() + self.compliance_gaps.len()
    }
}

/// Which path produced a clause assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentSource {
    Analyzer,
    Fallback,
}

/// Per-clause compliance verdict shown next to each clause in a contract
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClauseAssessment {
    pub clause_id: Option<String>,
    pub heading: String,
    pub clause_type: Option<String>, // None on the fallback path
    pub risk_level: Option<RiskLevel>,
    pub compliance_score: u8, // 0-100
    pub low_compliance: bool,
    pub source: AssessmentSource,
    pub analysis: Option<ClauseAnalysis>,
}

/// Assessment of every clause in one contract
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContractReview {
    pub contract_id: Option<String>,
    pub assessments: Vec<ClauseAssessment>,
    pub flagged_count: usize,
    pub average_score: f64,
    pub highest_risk: Option<RiskLevel>,
    pub reviewed_at: u64, // Unix seconds
}
