// src/application/error_handling.rs
//
// User-facing error mapping
//
// ARCHITECTURE:
// - Maps internal errors → user-facing responses
// - Validation messages name the exact unmet constraint
// - Collaborator (persistence) messages are surfaced verbatim
// - Remote failures suggest a retry and never say whose fault it was

use serde::{Deserialize, Serialize};

use crate::domain::{ClipError, DomainError};
use crate::error::AppError;

/// Standard error response for the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Malformed input; blocks the action, nothing else changes
    Validation,

    /// Availability check or network failure; worth retrying
    RemoteUnavailable,

    /// A storage write was rejected
    Persistence,

    /// A read failed and was replaced by a safe default
    Lookup,

    NotFound,

    Unauthorized,

    Internal,
}

const RETRY_MESSAGE: &str = "The video service could not be reached. Please try again.";

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Domain(DomainError::Clip(clip_error)) => match clip_error {
                ClipError::PlaybackUnavailable => {
                    Self::new(ErrorType::RemoteUnavailable, clip_error.to_string(), None)
                }
                other => Self::validation(other.to_string()),
            },

            AppError::Domain(DomainError::InvariantViolation(message)) => Self::validation(message),

            AppError::RemoteUnavailable(reason) => {
                log::warn!("Remote service unavailable: {}", reason);
                Self::new(ErrorType::RemoteUnavailable, RETRY_MESSAGE, Some(reason))
            }

            AppError::Storage(message) => Self::new(ErrorType::Persistence, message, None),

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(ErrorType::Persistence, db_error.to_string(), None)
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Persistence, pool_error, None)
            }

            AppError::NotFound => Self::not_found("Move"),

            AppError::Unauthorized(message) => Self::new(ErrorType::Unauthorized, message, None),

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::Internal,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// A read that degraded to a safe default
    pub fn lookup(message: String) -> Self {
        Self::new(ErrorType::Lookup, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Move not found");
    }

    #[test]
    fn test_clip_errors_are_validation_with_exact_message() {
        let error = ErrorResponse::from_app_error(ClipError::MissingStart.into());
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, ClipError::MissingStart.to_string());

        let error = ErrorResponse::from_app_error(ClipError::InvalidClipLength { max: 60 }.into());
        assert!(error.message.contains("between 1 and 60"));
    }

    #[test]
    fn test_playback_unavailable_suggests_retry() {
        let error = ErrorResponse::from_app_error(ClipError::PlaybackUnavailable.into());
        assert_eq!(error.error_type, ErrorType::RemoteUnavailable);

        let error =
            ErrorResponse::from_app_error(AppError::RemoteUnavailable("connection reset".to_string()));
        assert_eq!(error.error_type, ErrorType::RemoteUnavailable);
        assert_eq!(error.message, RETRY_MESSAGE);
    }

    #[test]
    fn test_storage_message_is_verbatim() {
        let error = ErrorResponse::from_app_error(AppError::Storage(
            "DB insert failed: UNIQUE constraint failed: moves.id".to_string(),
        ));
        assert_eq!(error.error_type, ErrorType::Persistence);
        assert_eq!(error.message, "DB insert failed: UNIQUE constraint failed: moves.id");
    }

    #[test]
    fn test_invariant_message_has_no_prefix() {
        let error = ErrorResponse::from_app_error(AppError::Domain(
            DomainError::InvariantViolation("Title and file required.".to_string()),
        ));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Title and file required.");
    }

    #[test]
    fn test_to_error_response() {
        let result: Result<(), AppError> =
            Err(AppError::Unauthorized("Uploads require Pro access.".to_string()));
        let error = result.to_error_response().unwrap_err();
        assert_eq!(error.error_type, ErrorType::Unauthorized);
        assert_eq!(error.message, "Uploads require Pro access.");
    }
}
