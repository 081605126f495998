// src/error/types.rs
use crate::domain::{ClipError, DomainError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Not allowed: {0}")]
    Unauthorized(String),

    /// Remote check failed; provider rejection and network errors look the same
    #[error("Remote service unavailable: {0}")]
    RemoteUnavailable(String),

    /// Storage collaborator rejected a write; message is the collaborator's own
    #[error("{0}")]
    Storage(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<ClipError> for AppError {
    fn from(err: ClipError) -> Self {
        AppError::Domain(DomainError::Clip(err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::RemoteUnavailable(err.to_string())
    }
}

impl AppError {
    /// Collaborator-supplied reason without the category prefix
    pub fn reason(&self) -> String {
        match self {
            AppError::Unauthorized(reason)
            | AppError::RemoteUnavailable(reason)
            | AppError::Storage(reason)
            | AppError::Pool(reason)
            | AppError::Other(reason) => reason.clone(),
            AppError::Domain(e) => e.to_string(),
            AppError::Database(e) => e.to_string(),
            other => other.to_string(),
        }
    }

    /// The clip validation failure behind this error, if any
    pub fn as_clip_error(&self) -> Option<&ClipError> {
        match self {
            AppError::Domain(DomainError::Clip(e)) => Some(e),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
