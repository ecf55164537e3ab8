use async_trait::async_trait;
use reviewbot_database_interface::DbTransaction;
use reviewbot_models::PullRequest;
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use crate::{
    errors::ConflictKind, transaction::finish_transaction,
    use_cases::reviews::SelectReplacementReviewerInterface, CoreContext, DomainError, Result,
};

/// Swap one reviewer of an open pull request, returning the new reviewer id.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignReviewerInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<(PullRequest, String)>;
}

#[derive(Component)]
#[shaku(interface = ReassignReviewerInterface)]
pub(crate) struct ReassignReviewer;

#[async_trait]
impl ReassignReviewerInterface for ReassignReviewer {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<(PullRequest, String)> {
        let tx = ctx.db_service.begin().await?;
        let result = self
            .run_in_transaction(ctx, tx.as_ref(), pull_request_id, old_reviewer_id)
            .await;

        finish_transaction(tx, result).await
    }
}

impl ReassignReviewer {
    async fn run_in_transaction(
        &self,
        ctx: &CoreContext<'_>,
        tx: &dyn DbTransaction,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<(PullRequest, String)> {
        let pull_request = tx.pull_requests_get(pull_request_id).await?.ok_or_else(|| {
            DomainError::PullRequestNotFound {
                pull_request_id: pull_request_id.into(),
            }
        })?;

        if pull_request.is_merged() {
            return Err(DomainError::Conflict(ConflictKind::AlreadyMerged));
        }

        if !pull_request.has_reviewer(old_reviewer_id) {
            return Err(DomainError::Conflict(ConflictKind::NotAssigned));
        }

        let old_reviewer =
            tx.users_get(old_reviewer_id)
                .await?
                .ok_or_else(|| DomainError::UserNotFound {
                    user_id: old_reviewer_id.into(),
                })?;

        let select_replacement: &dyn SelectReplacementReviewerInterface =
            ctx.core_module.resolve_ref();
        let new_reviewer_id = select_replacement
            .run(ctx, tx, &pull_request, &old_reviewer)
            .await?;

        tx.pull_request_reviewers_replace(pull_request_id, old_reviewer_id, &new_reviewer_id)
            .await?;

        info!(
            pull_request_id = pull_request_id,
            old_reviewer_id = old_reviewer_id,
            new_reviewer_id = %new_reviewer_id,
            message = "Reviewer reassigned"
        );

        let pull_request = tx.pull_requests_get_expect(pull_request_id).await?;
        Ok((pull_request, new_reviewer_id))
    }
}
