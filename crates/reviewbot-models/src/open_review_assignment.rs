use serde::{Deserialize, Serialize};

/// Reviewer link of an open pull request, joined with its author.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenReviewAssignment {
    pub pull_request_id: String,
    pub author_id: String,
    pub reviewer_id: String,
}
