//! Failure taxonomy shared by handlers, the dispatcher and the HTTP layer.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

use crate::notification::NotificationError;
use crate::repository::RepositoryError;
use crate::validation::ValidationFailure;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationFailure),
    #[error("{entity} ({id}) was not found.")]
    NotFound { entity: &'static str, id: i32 },
    #[error("operation cancelled")]
    Cancelled,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// A side effect marked as required did not go through.
    #[error("downstream failure: {0}")]
    Downstream(#[from] NotificationError),
}

impl ApplicationError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }
}

/// The dispatcher could not resolve exactly one handler for a request type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("more than one handler registered for {0}")]
    DuplicateHandler(&'static str),
    #[error("no handler registered for {0}")]
    MissingHandler(&'static str),
}

impl ResponseError for ApplicationError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            Self::Repository(_) | Self::Configuration(_) | Self::Downstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            Self::Validation(failure) => HttpResponse::build(status).json(json!({
                "message": "Validation failed",
                "errors": failure.violations().messages(),
            })),
            Self::NotFound { .. } => HttpResponse::build(status).json(json!({
                "message": self.to_string()
            })),
            Self::Cancelled => HttpResponse::build(status).json(json!({
                "message": "Request cancelled"
            })),
            _ => {
                tracing::error!(error = %self, "Request failed");
                HttpResponse::build(status).json(json!({
                    "message": "Internal Server Error"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Violations;

    #[test]
    fn not_found_message_names_entity_and_key() {
        let err = ApplicationError::not_found("LeaveRequest", 12);
        assert_eq!(err.to_string(), "LeaveRequest (12) was not found.");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let mut violations = Violations::default();
        violations.push("name", "name is required.");
        let err = ApplicationError::from(ValidationFailure(violations));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_faults_map_to_internal_error() {
        let err = ApplicationError::from(RepositoryError::Query("syntax".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
