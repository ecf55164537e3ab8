use std::collections::BTreeMap;

use reviewbot_database_interface::DbTransaction;
use reviewbot_models::{PullRequestAssignmentCount, Statistics, UserAssignmentCount};

use crate::{transaction::finish_transaction, CoreContext, Result};

/// Assignment counts, per user and per pull request, sorted by id.
pub struct GetStatistics;

impl GetStatistics {
    #[tracing::instrument(skip(self, ctx))]
    pub async fn run(&self, ctx: &CoreContext<'_>) -> Result<Statistics> {
        let tx = ctx.db_service.begin().await?;
        let result = self.run_in_transaction(tx.as_ref()).await;

        finish_transaction(tx, result).await
    }

    async fn run_in_transaction(&self, tx: &dyn DbTransaction) -> Result<Statistics> {
        let mut by_user: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_pull_request: BTreeMap<String, usize> = BTreeMap::new();

        for link in tx.pull_request_reviewers_all().await? {
            *by_user.entry(link.reviewer_id).or_default() += 1;
            *by_pull_request.entry(link.pull_request_id).or_default() += 1;
        }

        let pull_requests = tx.pull_requests_all().await?;
        let merged_pull_requests_count = pull_requests.iter().filter(|pr| pr.is_merged()).count();

        Ok(Statistics {
            assignments_by_user: by_user
                .into_iter()
                .map(|(user_id, count)| UserAssignmentCount { user_id, count })
                .collect(),
            assignments_by_pull_request: by_pull_request
                .into_iter()
                .map(|(pull_request_id, count)| PullRequestAssignmentCount {
                    pull_request_id,
                    count,
                })
                .collect(),
            open_pull_requests_count: pull_requests.len() - merged_pull_requests_count,
            merged_pull_requests_count,
        })
    }
}
