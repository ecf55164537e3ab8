use async_trait::async_trait;
use reviewbot_config::MAX_REVIEWERS_LIMIT;
use reviewbot_database_interface::DbTransaction;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

/// Pick the initial reviewers of a pull request among the author's active teammates.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SelectReviewersInterface: Interface {
    async fn run<'a, 't>(
        &self,
        ctx: &CoreContext<'a>,
        tx: &'t (dyn DbTransaction + 't),
        author_id: &str,
    ) -> Result<Vec<String>>;
}

#[derive(Component)]
#[shaku(interface = SelectReviewersInterface)]
pub(crate) struct SelectReviewers;

#[async_trait]
impl SelectReviewersInterface for SelectReviewers {
    #[tracing::instrument(skip(self, ctx, tx), ret)]
    async fn run<'a, 't>(
        &self,
        ctx: &CoreContext<'a>,
        tx: &'t (dyn DbTransaction + 't),
        author_id: &str,
    ) -> Result<Vec<String>> {
        let author = tx
            .users_get(author_id)
            .await?
            .ok_or_else(|| DomainError::AuthorNotFound {
                author_id: author_id.into(),
            })?;

        let candidates: Vec<String> = match &author.team_name {
            Some(team_name) => tx
                .users_list_active_team_members(team_name)
                .await?
                .into_iter()
                .map(|u| u.id)
                .filter(|id| id != author_id)
                .collect(),
            None => vec![],
        };

        let amount = ctx.config.max_reviewers.min(MAX_REVIEWERS_LIMIT);
        if candidates.is_empty() || amount == 0 {
            return Ok(vec![]);
        }

        Ok(ctx
            .random_service
            .choose_indices(candidates.len(), amount)
            .into_iter()
            .filter_map(|i| candidates.get(i).cloned())
            .collect())
    }
}
