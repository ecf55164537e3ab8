use async_trait::async_trait;
use reviewbot_models::{OpenReviewAssignment, PullRequest, PullRequestReviewer, Team, User};
use time::OffsetDateTime;

use crate::{DatabaseError, Result};

/// Storage operations, available both on the service and inside a transaction.
#[async_trait]
pub trait DbOperations: Send + Sync {
    async fn teams_create(&self, instance: Team) -> Result<Team>;
    async fn teams_get(&self, name: &str) -> Result<Option<Team>>;
    async fn teams_get_expect(&self, name: &str) -> Result<Team> {
        self.teams_get(name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(name.into()))
    }
    async fn teams_all(&self) -> Result<Vec<Team>>;

    /// Create or update a user.
    async fn users_create(&self, instance: User) -> Result<User>;
    async fn users_get(&self, id: &str) -> Result<Option<User>>;
    async fn users_get_expect(&self, id: &str) -> Result<User> {
        self.users_get(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))
    }
    async fn users_all(&self) -> Result<Vec<User>>;
    /// Team members sorted by id.
    async fn users_list_team_members(&self, team_name: &str) -> Result<Vec<User>>;
    /// Active team members sorted by id.
    async fn users_list_active_team_members(&self, team_name: &str) -> Result<Vec<User>>;
    async fn users_set_is_active(&self, id: &str, value: bool) -> Result<User>;
    /// Deactivate the given users belonging to the team, returning the matched ids sorted.
    async fn users_deactivate_team_members(
        &self,
        team_name: &str,
        ids: &[String],
    ) -> Result<Vec<String>>;

    /// Insert a pull request with its reviewer links.
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(&self, id: &str) -> Result<PullRequest> {
        self.pull_requests_get(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))
    }
    async fn pull_requests_all(&self) -> Result<Vec<PullRequest>>;
    async fn pull_requests_list_for_reviewer(&self, reviewer_id: &str) -> Result<Vec<PullRequest>>;
    async fn pull_requests_set_merged(
        &self,
        id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<PullRequest>;

    async fn pull_request_reviewers_create(
        &self,
        instance: PullRequestReviewer,
    ) -> Result<PullRequestReviewer>;
    /// Links of a pull request, in link order.
    async fn pull_request_reviewers_list(
        &self,
        pull_request_id: &str,
    ) -> Result<Vec<PullRequestReviewer>>;
    async fn pull_request_reviewers_all(&self) -> Result<Vec<PullRequestReviewer>>;
    /// Links of open pull requests held by one of the reviewers, ordered by pull request id then link order.
    async fn pull_request_reviewers_list_open_for_reviewers(
        &self,
        reviewer_ids: &[String],
    ) -> Result<Vec<OpenReviewAssignment>>;
    /// Swap the reviewer of a link in place.
    async fn pull_request_reviewers_replace(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<bool>;
    async fn pull_request_reviewers_delete(
        &self,
        pull_request_id: &str,
        reviewer_id: &str,
    ) -> Result<bool>;
}

#[async_trait]
pub trait DbService: DbOperations {
    async fn begin(&self) -> Result<Box<dyn DbTransaction + '_>>;
    async fn health_check(&self) -> Result<()>;
}

#[async_trait]
pub trait DbTransaction: DbOperations {
    async fn commit(self: Box<Self>) -> Result<()>;
    async fn rollback(self: Box<Self>) -> Result<()>;
}
