//! Application-wide error types.
//!
//! Every failure surfaced to a caller maps to exactly one of these kinds.
//! The request layer turns the kind into a status code and the stable
//! `error_code` into the machine-readable `error` field of the response body.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// No authenticated principal.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Principal is authenticated but not a member of the group.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Group, user, or email does not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input (empty name, malformed email).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (e.g., duplicate membership).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Persistence or connectivity failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the human-readable detail without the kind prefix.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
