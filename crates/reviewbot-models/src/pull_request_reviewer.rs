use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestReviewer {
    pub pull_request_id: String,
    pub reviewer_id: String,
}
