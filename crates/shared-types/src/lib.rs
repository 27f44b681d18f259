pub mod types;

pub use types::{
    AssessmentSource, Clause, ClauseAnalysis, ClauseAssessment, ContractReview, RiskLevel,
    DEFAULT_COPILOT_HEADING, DEFAULT_HEADING,
};
