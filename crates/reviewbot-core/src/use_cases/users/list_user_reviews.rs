use reviewbot_models::PullRequest;

use crate::{transaction::finish_transaction, CoreContext, DomainError, Result};

/// Pull requests a user reviews, open and merged alike.
pub struct ListUserReviews;

impl ListUserReviews {
    #[tracing::instrument(skip(self, ctx))]
    pub async fn run(&self, ctx: &CoreContext<'_>, user_id: &str) -> Result<Vec<PullRequest>> {
        let tx = ctx.db_service.begin().await?;
        let result: Result<_> = async {
            if tx.users_get(user_id).await?.is_none() {
                return Err(DomainError::UserNotFound {
                    user_id: user_id.into(),
                });
            }

            Ok(tx.pull_requests_list_for_reviewer(user_id).await?)
        }
        .await;

        finish_transaction(tx, result).await
    }
}
