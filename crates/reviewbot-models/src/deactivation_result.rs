use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeactivationResult {
    pub team_name: String,
    pub deactivated_count: usize,
    /// Reviewer links examined, one per (pull request, deactivated reviewer).
    pub affected_pull_request_count: usize,
    pub reassigned_reviewers_count: usize,
}

impl DeactivationResult {
    pub fn empty(team_name: &str) -> Self {
        Self {
            team_name: team_name.into(),
            ..Default::default()
        }
    }
}
