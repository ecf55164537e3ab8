use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Unknown pull request '{0}'")]
    UnknownPullRequest(String),

    #[error("Team '{0}' already exists")]
    TeamAlreadyExists(String),

    #[error("Pull request '{0}' already exists")]
    PullRequestAlreadyExists(String),

    #[error("Reviewer '{1}' is already assigned on pull request '{0}'")]
    DuplicatePullRequestReviewer(String, String),

    #[error("Transaction conflicts with a concurrent write")]
    SerializationFailure,

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
