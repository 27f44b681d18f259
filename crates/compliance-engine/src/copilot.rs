//! Copilot conversation around clause regeneration
//!
//! A session is opened on one clause, narrates the analysis as chat
//! messages, and holds the improved draft until the user accepts or
//! rejects it.

use serde::{Deserialize, Serialize};
use shared_types::{Clause, ClauseAnalysis};
use thiserror::Error;
use tracing::debug;

use crate::analyze_clause;

/// Characters of the clause quoted in the welcome message
const WELCOME_EXCERPT_CHARS: usize = 60;

pub const REGENERATE_REQUEST: &str = "Yes, please regenerate this clause with better compliance.";
pub const ACCEPTED_MESSAGE: &str =
    "✓ Clause updated successfully! The contract will be re-analyzed.";
pub const REJECTED_MESSAGE: &str = "No problem! I'll close this session. Feel free to regenerate any other clauses that need improvement.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CopilotError {
    #[error("No regenerated clause to accept")]
    NothingGenerated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    System,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopilotMessage {
    pub role: MessageRole,
    pub content: String,
}

impl CopilotMessage {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// One copilot conversation about a single clause
#[derive(Debug, Clone, Serialize)]
pub struct CopilotSession {
    clause_id: Option<String>,
    clause_text: String,
    messages: Vec<CopilotMessage>,
    analysis: Option<ClauseAnalysis>,
    generated: Option<String>,
}

impl CopilotSession {
    /// Open a session and greet the user with an excerpt of the clause
    pub fn open(clause_id: Option<String>, clause_text: &str) -> Self {
        let excerpt: String = clause_text.chars().take(WELCOME_EXCERPT_CHARS).collect();
        let welcome = format!(
            "Hi! I've analyzed this clause and detected some compliance issues. The clause \"{}...\" needs improvement.\n\nWould you like me to regenerate it with enhanced compliance and legal strength?",
            excerpt
        );

        Self {
            clause_id,
            clause_text: clause_text.to_string(),
            messages: vec![CopilotMessage::new(MessageRole::Assistant, welcome)],
            analysis: None,
            generated: None,
        }
    }

    /// Analyze the clause and draft an improved version
    pub fn regenerate(&mut self) -> &ClauseAnalysis {
        self.messages
            .push(CopilotMessage::new(MessageRole::User, REGENERATE_REQUEST));

        let clause = Clause::from_copilot_text(self.clause_id.clone(), &self.clause_text);
        let analysis = analyze_clause(&clause);
        debug!(
            clause_id = ?self.clause_id,
            risk = %analysis.risk_level,
            "copilot regenerated clause"
        );

        self.messages.extend(
            analysis
                .analysis_steps
                .iter()
                .map(|step| CopilotMessage::new(MessageRole::System, step.as_str())),
        );
        self.messages
            .push(CopilotMessage::new(MessageRole::Assistant, findings_message(&analysis)));
        self.messages.push(CopilotMessage::new(
            MessageRole::Assistant,
            improvements_message(&analysis),
        ));

        self.generated = Some(analysis.improved_version.clone());
        self.analysis.insert(analysis)
    }

    /// Take the improved draft for the caller to store
    pub fn accept(&mut self) -> Result<String, CopilotError> {
        let improved = self.generated.take().ok_or(CopilotError::NothingGenerated)?;
        self.messages
            .push(CopilotMessage::new(MessageRole::System, ACCEPTED_MESSAGE));
        Ok(improved)
    }

    /// Discard the improved draft
    pub fn reject(&mut self) {
        self.generated = None;
        self.messages
            .push(CopilotMessage::new(MessageRole::Assistant, REJECTED_MESSAGE));
    }

    pub fn clause_id(&self) -> Option<&str> {
        self.clause_id.as_deref()
    }

    pub fn messages(&self) -> &[CopilotMessage] {
        &self.messages
    }

    pub fn analysis(&self) -> Option<&ClauseAnalysis> {
        self.analysis.as_ref()
    }

    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }
}

/// Summary posted once analysis finishes
pub fn findings_message(analysis: &ClauseAnalysis) -> String {
    format!(
        "Analysis complete! I've identified **{} structural issues** and **{} compliance gaps**.\n\n**Risk Level:** {}\n\nGenerating improved version...",
        analysis.issues.len(),
        analysis.compliance_gaps.len(),
        analysis.risk_level
    )
}

/// Numbered list of the recommendations applied to the draft
pub fn improvements_message(analysis: &ClauseAnalysis) -> String {
    let list = analysis
        .recommendations
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}", i + 1, r))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "I've regenerated the clause with the following improvements:\n\n{}\n\nThe improved version addresses all identified issues and enhances legal enforceability.",
        list
    )
}
