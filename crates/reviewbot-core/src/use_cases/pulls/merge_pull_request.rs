use async_trait::async_trait;
use reviewbot_database_interface::DbTransaction;
use reviewbot_models::PullRequest;
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::info;

use crate::{transaction::finish_transaction, CoreContext, DomainError, Result};

/// Mark a pull request as merged. Merging twice returns the pull request unchanged.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MergePullRequestInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = MergePullRequestInterface)]
pub(crate) struct MergePullRequest;

#[async_trait]
impl MergePullRequestInterface for MergePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest> {
        let tx = ctx.db_service.begin().await?;
        let result = self.run_in_transaction(tx.as_ref(), pull_request_id).await;

        finish_transaction(tx, result).await
    }
}

impl MergePullRequest {
    async fn run_in_transaction(
        &self,
        tx: &dyn DbTransaction,
        pull_request_id: &str,
    ) -> Result<PullRequest> {
        let pull_request = tx.pull_requests_get(pull_request_id).await?.ok_or_else(|| {
            DomainError::PullRequestNotFound {
                pull_request_id: pull_request_id.into(),
            }
        })?;

        if pull_request.is_merged() {
            return Ok(pull_request);
        }

        let pull_request = tx
            .pull_requests_set_merged(pull_request_id, OffsetDateTime::now_utc())
            .await?;

        info!(
            pull_request_id = pull_request_id,
            message = "Pull request merged"
        );

        Ok(pull_request)
    }
}
