//! Domain errors.

use std::fmt::Display;

use thiserror::Error;

/// Kind of state conflict on a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    AlreadyMerged,
    NotAssigned,
    NoCandidate,
}

impl ConflictKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::AlreadyMerged => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoCandidate => "NO_CANDIDATE",
        }
    }
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::AlreadyMerged => "cannot reassign on merged pull request",
            Self::NotAssigned => "reviewer is not assigned to this pull request",
            Self::NoCandidate => "no active replacement candidate in team",
        })
    }
}

/// Domain error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Pull request '{pull_request_id}' already exists")]
    PullRequestAlreadyExists { pull_request_id: String },

    #[error("Author '{author_id}' not found")]
    AuthorNotFound { author_id: String },

    #[error("User '{user_id}' not found")]
    UserNotFound { user_id: String },

    #[error("Team '{team_name}' not found")]
    TeamNotFound { team_name: String },

    #[error("Team '{team_name}' already exists")]
    TeamAlreadyExists { team_name: String },

    #[error("Pull request '{pull_request_id}' not found")]
    PullRequestNotFound { pull_request_id: String },

    #[error("Conflict: {0}")]
    Conflict(ConflictKind),

    /// Wraps [`reviewbot_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError {
        source: reviewbot_database_interface::DatabaseError,
    },
}

impl DomainError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PullRequestAlreadyExists { .. } => "PR_EXISTS",
            Self::AuthorNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::TeamNotFound { .. }
            | Self::PullRequestNotFound { .. } => "NOT_FOUND",
            Self::TeamAlreadyExists { .. } => "TEAM_EXISTS",
            Self::Conflict(kind) => kind.code(),
            Self::DatabaseError { .. } => "INTERNAL",
        }
    }
}

impl From<reviewbot_database_interface::DatabaseError> for DomainError {
    fn from(e: reviewbot_database_interface::DatabaseError) -> Self {
        Self::DatabaseError { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
