use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PullRequestStatusError {
    /// Unknown pull request status.
    #[error("Unknown pull request status: {}", status)]
    UnknownPullRequestStatus { status: String },
}

/// Pull request status.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Copy, Clone, Default, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    /// Open, reviewers can still be swapped.
    #[default]
    Open,
    /// Merged, terminal.
    Merged,
}

impl PullRequestStatus {
    /// Convert pull request status to static str.
    pub fn to_str(self) -> &'static str {
        self.into()
    }
}

impl Display for PullRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for PullRequestStatus {
    type Err = PullRequestStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl TryFrom<&str> for PullRequestStatus {
    type Error = PullRequestStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            e => Err(PullRequestStatusError::UnknownPullRequestStatus {
                status: e.to_string(),
            }),
        }
    }
}

impl TryFrom<&String> for PullRequestStatus {
    type Error = PullRequestStatusError;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Self::try_from(&value[..])
    }
}

impl From<PullRequestStatus> for &'static str {
    fn from(status: PullRequestStatus) -> Self {
        match status {
            PullRequestStatus::Open => "OPEN",
            PullRequestStatus::Merged => "MERGED",
        }
    }
}
