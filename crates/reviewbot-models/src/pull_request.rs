use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::PullRequestStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    /// Reviewer ids, in link order.
    pub assigned_reviewers: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub merged_at: Option<OffsetDateTime>,
}

impl Default for PullRequest {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            author_id: String::new(),
            status: PullRequestStatus::Open,
            assigned_reviewers: Vec::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            merged_at: None,
        }
    }
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.assigned_reviewers.iter().any(|r| r == user_id)
    }

    /// Mark as merged. Keeps the first merge timestamp.
    pub fn merge(mut self, now: OffsetDateTime) -> Self {
        if !self.is_merged() {
            self.status = PullRequestStatus::Merged;
            self.merged_at = Some(now);
        }
        self
    }
}
