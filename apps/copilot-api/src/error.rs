//! Error types for the copilot server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ledger_core::LedgerError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Ledger(LedgerError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Ledger(_) => "LEDGER_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Ledger(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(what) => ApiError::NotFound(what),
            LedgerError::State(msg) => ApiError::Internal(msg),
            other => ApiError::Ledger(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: &'static str,
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            tracing::error!("internal error: {}", msg);
        }

        let body = ErrorEnvelope {
            error: ErrorBody {
                message: self.to_string(),
                code: self.code(),
            },
        };

        (self.status(), Json(body)).into_response()
    }
}
