use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAssignmentCount {
    pub user_id: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestAssignmentCount {
    pub pull_request_id: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    pub assignments_by_user: Vec<UserAssignmentCount>,
    pub assignments_by_pull_request: Vec<PullRequestAssignmentCount>,
    pub open_pull_requests_count: usize,
    pub merged_pull_requests_count: usize,
}
