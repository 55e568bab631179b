//! Error types for the triage service.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::models::CaseStatus;

pub type Result<T, E = TriageError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("case {0} not found")]
    CaseNotFound(String),

    #[error("case cannot move from {} to {}", .from.as_str(), .to.as_str())]
    InvalidTransition { from: CaseStatus, to: CaseStatus },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl TriageError {
    fn kind(&self) -> &'static str {
        match self {
            TriageError::InvalidRequest(_) => "Invalid request",
            TriageError::CaseNotFound(_) => "Case not found",
            TriageError::InvalidTransition { .. } => "Invalid transition",
            TriageError::Config(_) => "Configuration error",
        }
    }
}

impl From<validator::ValidationErrors> for TriageError {
    fn from(errors: validator::ValidationErrors) -> Self {
        TriageError::InvalidRequest(errors.to_string())
    }
}

impl ResponseError for TriageError {
    fn status_code(&self) -> StatusCode {
        match self {
            TriageError::InvalidRequest(_) | TriageError::InvalidTransition { .. } => {
                StatusCode::BAD_REQUEST
            }
            TriageError::CaseNotFound(_) => StatusCode::NOT_FOUND,
            TriageError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "details": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(
            TriageError::CaseNotFound("TR-2026-1234".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TriageError::InvalidRequest("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn transition_message_names_both_statuses() {
        let err = TriageError::InvalidTransition {
            from: CaseStatus::Complete,
            to: CaseStatus::Processing,
        };
        assert_eq!(err.to_string(), "case cannot move from complete to processing");
    }
}
