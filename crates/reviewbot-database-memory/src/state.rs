use std::collections::{BTreeSet, HashMap};

use reviewbot_database_interface::{DatabaseError, Result};
use reviewbot_models::{
    OpenReviewAssignment, PullRequest, PullRequestReviewer, PullRequestStatus, Team, User,
};
use time::OffsetDateTime;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MemoryState {
    teams: HashMap<String, Team>,
    users: HashMap<String, User>,
    /// Stored without their reviewers, which live in `reviewers`.
    pull_requests: HashMap<String, PullRequest>,
    /// Links in insertion order.
    reviewers: Vec<PullRequestReviewer>,
}

impl MemoryState {
    pub fn teams_create(&mut self, instance: Team) -> Result<Team> {
        if self.teams.contains_key(&instance.name) {
            return Err(DatabaseError::TeamAlreadyExists(instance.name));
        }

        self.teams.insert(instance.name.clone(), instance.clone());
        Ok(instance)
    }

    pub fn teams_get(&self, name: &str) -> Option<Team> {
        self.teams.get(name).cloned()
    }

    pub fn teams_all(&self) -> Vec<Team> {
        let mut values: Vec<_> = self.teams.values().cloned().collect();
        values.sort_by(|a, b| a.name.cmp(&b.name));
        values
    }

    pub fn users_create(&mut self, instance: User) -> Result<User> {
        if let Some(team_name) = &instance.team_name {
            if !self.teams.contains_key(team_name) {
                return Err(DatabaseError::UnknownTeam(team_name.clone()));
            }
        }

        self.users.insert(instance.id.clone(), instance.clone());
        Ok(instance)
    }

    pub fn users_get(&self, id: &str) -> Option<User> {
        self.users.get(id).cloned()
    }

    pub fn users_all(&self) -> Vec<User> {
        let mut values: Vec<_> = self.users.values().cloned().collect();
        values.sort_by(|a, b| a.id.cmp(&b.id));
        values
    }

    pub fn users_list_team_members(&self, team_name: &str, active_only: bool) -> Vec<User> {
        let mut values: Vec<_> = self
            .users
            .values()
            .filter(|u| u.belongs_to(team_name) && (u.is_active || !active_only))
            .cloned()
            .collect();
        values.sort_by(|a, b| a.id.cmp(&b.id));
        values
    }

    pub fn users_set_is_active(&mut self, id: &str, value: bool) -> Result<User> {
        let user = self
            .users
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))?;

        user.is_active = value;
        Ok(user.clone())
    }

    pub fn users_deactivate_team_members(&mut self, team_name: &str, ids: &[String]) -> Vec<String> {
        let ids: BTreeSet<&String> = ids.iter().collect();
        let mut matched = vec![];

        for id in ids {
            if let Some(user) = self.users.get_mut(id) {
                if user.belongs_to(team_name) {
                    user.is_active = false;
                    matched.push(id.clone());
                }
            }
        }

        matched
    }

    pub fn pull_requests_create(&mut self, instance: PullRequest) -> Result<PullRequest> {
        if self.pull_requests.contains_key(&instance.id) {
            return Err(DatabaseError::PullRequestAlreadyExists(instance.id));
        }

        if !self.users.contains_key(&instance.author_id) {
            return Err(DatabaseError::UnknownUser(instance.author_id));
        }

        let mut seen = BTreeSet::new();
        for reviewer_id in &instance.assigned_reviewers {
            if !self.users.contains_key(reviewer_id) {
                return Err(DatabaseError::UnknownUser(reviewer_id.clone()));
            }

            if !seen.insert(reviewer_id) {
                return Err(DatabaseError::DuplicatePullRequestReviewer(
                    instance.id.clone(),
                    reviewer_id.clone(),
                ));
            }
        }

        for reviewer_id in &instance.assigned_reviewers {
            self.reviewers.push(PullRequestReviewer {
                pull_request_id: instance.id.clone(),
                reviewer_id: reviewer_id.clone(),
            });
        }

        self.pull_requests.insert(
            instance.id.clone(),
            PullRequest {
                assigned_reviewers: vec![],
                ..instance.clone()
            },
        );

        Ok(instance)
    }

    pub fn pull_requests_get(&self, id: &str) -> Option<PullRequest> {
        self.pull_requests.get(id).map(|pr| self.with_reviewers(pr))
    }

    pub fn pull_requests_all(&self) -> Vec<PullRequest> {
        let mut values: Vec<_> = self
            .pull_requests
            .values()
            .map(|pr| self.with_reviewers(pr))
            .collect();
        values.sort_by(|a, b| a.id.cmp(&b.id));
        values
    }

    pub fn pull_requests_list_for_reviewer(&self, reviewer_id: &str) -> Vec<PullRequest> {
        let mut values: Vec<_> = self
            .reviewers
            .iter()
            .filter(|r| r.reviewer_id == reviewer_id)
            .filter_map(|r| self.pull_requests_get(&r.pull_request_id))
            .collect();
        values.sort_by(|a, b| a.id.cmp(&b.id));
        values
    }

    pub fn pull_requests_set_merged(
        &mut self,
        id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<PullRequest> {
        let pr = self
            .pull_requests
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))?;

        pr.status = PullRequestStatus::Merged;
        pr.merged_at = Some(merged_at);

        let pr = pr.clone();
        Ok(self.with_reviewers(&pr))
    }

    pub fn pull_request_reviewers_create(
        &mut self,
        instance: PullRequestReviewer,
    ) -> Result<PullRequestReviewer> {
        if !self.pull_requests.contains_key(&instance.pull_request_id) {
            return Err(DatabaseError::UnknownPullRequest(
                instance.pull_request_id,
            ));
        }

        if !self.users.contains_key(&instance.reviewer_id) {
            return Err(DatabaseError::UnknownUser(instance.reviewer_id));
        }

        if self.has_link(&instance.pull_request_id, &instance.reviewer_id) {
            return Err(DatabaseError::DuplicatePullRequestReviewer(
                instance.pull_request_id,
                instance.reviewer_id,
            ));
        }

        self.reviewers.push(instance.clone());
        Ok(instance)
    }

    pub fn pull_request_reviewers_list(&self, pull_request_id: &str) -> Vec<PullRequestReviewer> {
        self.reviewers
            .iter()
            .filter(|r| r.pull_request_id == pull_request_id)
            .cloned()
            .collect()
    }

    pub fn pull_request_reviewers_all(&self) -> Vec<PullRequestReviewer> {
        self.reviewers.clone()
    }

    pub fn pull_request_reviewers_list_open_for_reviewers(
        &self,
        reviewer_ids: &[String],
    ) -> Vec<OpenReviewAssignment> {
        let mut values: Vec<_> = self
            .reviewers
            .iter()
            .filter(|r| reviewer_ids.contains(&r.reviewer_id))
            .filter_map(|r| {
                self.pull_requests
                    .get(&r.pull_request_id)
                    .filter(|pr| pr.status == PullRequestStatus::Open)
                    .map(|pr| OpenReviewAssignment {
                        pull_request_id: pr.id.clone(),
                        author_id: pr.author_id.clone(),
                        reviewer_id: r.reviewer_id.clone(),
                    })
            })
            .collect();

        // Stable sort, link order is kept inside a pull request.
        values.sort_by(|a, b| a.pull_request_id.cmp(&b.pull_request_id));
        values
    }

    pub fn pull_request_reviewers_replace(
        &mut self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<bool> {
        if !self.users.contains_key(new_reviewer_id) {
            return Err(DatabaseError::UnknownUser(new_reviewer_id.into()));
        }

        if self.has_link(pull_request_id, new_reviewer_id) {
            return Err(DatabaseError::DuplicatePullRequestReviewer(
                pull_request_id.into(),
                new_reviewer_id.into(),
            ));
        }

        match self
            .reviewers
            .iter_mut()
            .find(|r| r.pull_request_id == pull_request_id && r.reviewer_id == old_reviewer_id)
        {
            Some(link) => {
                link.reviewer_id = new_reviewer_id.into();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn pull_request_reviewers_delete(&mut self, pull_request_id: &str, reviewer_id: &str) -> bool {
        let count = self.reviewers.len();
        self.reviewers
            .retain(|r| !(r.pull_request_id == pull_request_id && r.reviewer_id == reviewer_id));
        count != self.reviewers.len()
    }

    fn has_link(&self, pull_request_id: &str, reviewer_id: &str) -> bool {
        self.reviewers
            .iter()
            .any(|r| r.pull_request_id == pull_request_id && r.reviewer_id == reviewer_id)
    }

    fn with_reviewers(&self, pr: &PullRequest) -> PullRequest {
        PullRequest {
            assigned_reviewers: self
                .reviewers
                .iter()
                .filter(|r| r.pull_request_id == pr.id)
                .map(|r| r.reviewer_id.clone())
                .collect(),
            ..pr.clone()
        }
    }
}
