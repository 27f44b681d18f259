//! Clause compliance analysis
//!
//! Classifies a clause, flags structural and drafting issues, lists missing
//! elements for its type, rates the risk and drafts an improved version.
//! Everything here is a pure function of the input clause.

pub mod classify;
pub mod copilot;
pub mod patterns;
pub mod recommend;
pub mod rewrite;
pub mod rules;
pub mod scoring;

use serde::Deserialize;
use serde_json::Value;
use shared_types::{
    AssessmentSource, Clause, ClauseAnalysis, ClauseAssessment, ContractReview, RiskLevel,
};
use tracing::{debug, warn};

pub use copilot::{CopilotError, CopilotSession};

/// Analyze one clause.
///
/// Total over any input: missing fields fall back to an empty body and the
/// "Untitled" heading.
pub fn analyze_clause(clause: &Clause) -> ClauseAnalysis {
    let text = clause.body();
    let heading = clause.heading_or_default();
    let clause_type = classify::detect_clause_type(text, heading);

    let mut issues = Vec::new();
    let mut compliance_gaps = Vec::new();
    let mut analysis_steps = Vec::with_capacity(7);

    analysis_steps.push("Analyzing clause structure and completeness...".to_string());
    issues.extend(rules::structure::check_structure(text));

    analysis_steps.push("Evaluating legal language strength...".to_string());
    issues.extend(rules::language::check_legal_language(text));

    analysis_steps.push(format!("Checking {}-specific requirements...", clause_type));
    compliance_gaps.extend(rules::requirements::check_required_elements(text, clause_type));

    analysis_steps.push("Cross-referencing with regulatory standards...".to_string());
    compliance_gaps.extend(rules::regulatory::check_regulatory_compliance(text, clause_type));

    analysis_steps.push("Assessing risk exposure...".to_string());
    let risk_level = RiskLevel::from_problem_count(issues.len() + compliance_gaps.len());

    analysis_steps.push("Drafting recommendations...".to_string());
    let recommendations =
        recommend::generate_recommendations(&issues, &compliance_gaps, clause_type);

    analysis_steps.push("Generating improved clause version...".to_string());
    let improved_version = rewrite::generate_improved_clause(
        text,
        heading,
        clause_type,
        &issues,
        &compliance_gaps,
    );

    ClauseAnalysis {
        clause_type: clause_type.to_string(),
        issues,
        risk_level,
        compliance_gaps,
        recommendations,
        improved_version,
        analysis_steps,
    }
}

/// ComplianceEngine entry point
pub struct ComplianceEngine;

impl ComplianceEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, clause: &Clause) -> ClauseAnalysis {
        analyze_clause(clause)
    }

    /// Score a decoded clause through the analyzer
    pub fn assess(&self, clause: &Clause) -> ClauseAssessment {
        let analysis = analyze_clause(clause);
        debug!(
            clause_id = ?clause.clause_id,
            clause_type = %analysis.clause_type,
            risk = %analysis.risk_level,
            "assessed clause"
        );

        ClauseAssessment {
            clause_id: clause.clause_id.clone(),
            heading: clause.heading_or_default().to_string(),
            clause_type: Some(analysis.clause_type.clone()),
            risk_level: Some(analysis.risk_level),
            compliance_score: scoring::compliance_score(&analysis),
            low_compliance: scoring::is_low_compliance(&analysis),
            source: AssessmentSource::Analyzer,
            analysis: Some(analysis),
        }
    }

    /// Score a clause straight from JSON.
    ///
    /// Clauses that do not decode (a numeric `text`, a bare string) get the
    /// keyword fallback instead of an error.
    pub fn assess_value(&self, value: &Value) -> ClauseAssessment {
        match Clause::deserialize(value) {
            Ok(clause) => self.assess(&clause),
            Err(e) => {
                warn!("Clause could not be analyzed, using fallback heuristic: {}", e);
                let body = scoring::raw_body(value);

                ClauseAssessment {
                    clause_id: scoring::raw_clause_id(value),
                    heading: scoring::raw_heading(value).to_string(),
                    clause_type: None,
                    risk_level: None,
                    compliance_score: scoring::fallback_score(body),
                    low_compliance: scoring::fallback_flagged(body),
                    source: AssessmentSource::Fallback,
                    analysis: None,
                }
            }
        }
    }

    /// Assess every clause of a contract
    pub fn review(&self, contract_id: Option<String>, clauses: &[Value]) -> ContractReview {
        let assessments: Vec<ClauseAssessment> =
            clauses.iter().map(|c| self.assess_value(c)).collect();

        let flagged_count = assessments.iter().filter(|a| a.low_compliance).count();
        let average_score = if assessments.is_empty() {
            0.0
        } else {
            let total: f64 = assessments
                .iter()
                .map(|a| f64::from(a.compliance_score))
                .sum();
            total / assessments.len() as f64
        };
        let highest_risk = assessments.iter().filter_map(|a| a.risk_level).max();

        ContractReview {
            contract_id,
            assessments,
            flagged_count,
            average_score,
            highest_risk,
            reviewed_at: chrono::Utc::now().timestamp() as u64,
        }
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}
