use async_trait::async_trait;
use reviewbot_database_interface::DbTransaction;
use reviewbot_models::{PullRequest, User};
use shaku::{Component, Interface};

use crate::{errors::ConflictKind, CoreContext, DomainError, Result};

/// Pick a replacement for a reviewer among the active members of their team.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SelectReplacementReviewerInterface: Interface {
    async fn run<'a, 't>(
        &self,
        ctx: &CoreContext<'a>,
        tx: &'t (dyn DbTransaction + 't),
        pull_request: &PullRequest,
        old_reviewer: &User,
    ) -> Result<String>;
}

#[derive(Component)]
#[shaku(interface = SelectReplacementReviewerInterface)]
pub(crate) struct SelectReplacementReviewer;

#[async_trait]
impl SelectReplacementReviewerInterface for SelectReplacementReviewer {
    #[tracing::instrument(
        skip_all,
        fields(pull_request_id = %pull_request.id, old_reviewer_id = %old_reviewer.id),
        ret
    )]
    async fn run<'a, 't>(
        &self,
        ctx: &CoreContext<'a>,
        tx: &'t (dyn DbTransaction + 't),
        pull_request: &PullRequest,
        old_reviewer: &User,
    ) -> Result<String> {
        let team_name = match &old_reviewer.team_name {
            Some(team_name) => team_name,
            None => return Err(DomainError::Conflict(ConflictKind::NoCandidate)),
        };

        let candidates: Vec<String> = tx
            .users_list_active_team_members(team_name)
            .await?
            .into_iter()
            .map(|u| u.id)
            .filter(|id| {
                id != &old_reviewer.id
                    && id != &pull_request.author_id
                    && !pull_request.has_reviewer(id)
            })
            .collect();

        if candidates.is_empty() {
            return Err(DomainError::Conflict(ConflictKind::NoCandidate));
        }

        ctx.random_service
            .choose_indices(candidates.len(), 1)
            .first()
            .and_then(|&i| candidates.get(i).cloned())
            .ok_or(DomainError::Conflict(ConflictKind::NoCandidate))
    }
}
