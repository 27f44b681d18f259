use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid amount '{0}': must be a whole number")]
    InvalidAmount(String),

    #[error("Invalid vote '{0}': must be 'yes' or 'no'")]
    InvalidVote(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("State error: {0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

pub(crate) fn require_non_empty(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::InvalidArgument(format!("{} is empty", what)));
    }
    Ok(())
}
