//! Group error types.

use tally_shared::AppError;
use tally_shared::types::{GroupId, UserId};
use thiserror::Error;

/// Errors that can occur during group operations.
#[derive(Debug, Error)]
pub enum GroupError {
    // ========== Validation Errors ==========
    /// Group name is empty after trimming.
    #[error("Group name cannot be empty")]
    EmptyName,

    /// Group name is longer than the column allows.
    #[error("Group name cannot exceed {max} characters")]
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
    },

    /// Email address is malformed.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    // ========== Authorization Errors ==========
    /// The caller is not a member of the group.
    #[error("Not a member of group {0}")]
    NotMember(GroupId),

    // ========== Lookup Errors ==========
    /// Group not found.
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    /// No user is registered with this email.
    #[error("No user found with email {0}")]
    UserNotFound(String),

    // ========== Conflict Errors ==========
    /// The user already belongs to the group.
    #[error("User {user_id} is already a member of group {group_id}")]
    AlreadyMember {
        /// The group.
        group_id: GroupId,
        /// The user.
        user_id: UserId,
    },

    // ========== Runtime Errors ==========
    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,

    /// The caller's deadline passed before the operation finished.
    #[error("Operation deadline exceeded")]
    DeadlineExceeded,

    /// Repository (persistence) error.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl GroupError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_GROUP_NAME",
            Self::NameTooLong { .. } => "GROUP_NAME_TOO_LONG",
            Self::InvalidEmail(_) => "INVALID_EMAIL",
            Self::NotMember(_) => "NOT_A_MEMBER",
            Self::GroupNotFound(_) => "GROUP_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::AlreadyMember { .. } => "ALREADY_A_MEMBER",
            Self::Cancelled => "CANCELLED",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }
}

impl From<GroupError> for AppError {
    fn from(err: GroupError) -> Self {
        let msg = err.to_string();
        match err {
            GroupError::EmptyName | GroupError::NameTooLong { .. } | GroupError::InvalidEmail(_) => {
                Self::Validation(msg)
            }
            GroupError::NotMember(_) => Self::Forbidden(msg),
            GroupError::GroupNotFound(_) | GroupError::UserNotFound(_) => Self::NotFound(msg),
            GroupError::AlreadyMember { .. } => Self::Conflict(msg),
            GroupError::Cancelled | GroupError::DeadlineExceeded | GroupError::Repository(_) => {
                Self::Internal(msg)
            }
        }
    }
}
