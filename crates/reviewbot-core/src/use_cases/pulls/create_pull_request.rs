use async_trait::async_trait;
use reviewbot_database_interface::{DatabaseError, DbTransaction};
use reviewbot_models::{PullRequest, PullRequestStatus};
use shaku::{Component, HasComponent, Interface};
use time::OffsetDateTime;
use tracing::info;

use crate::{
    transaction::finish_transaction, use_cases::reviews::SelectReviewersInterface, CoreContext,
    DomainError, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreatePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = CreatePullRequestInterface)]
pub(crate) struct CreatePullRequest;

#[async_trait]
impl CreatePullRequestInterface for CreatePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        let tx = ctx.db_service.begin().await?;
        let result = self
            .run_in_transaction(ctx, tx.as_ref(), pull_request_id, name, author_id)
            .await;

        finish_transaction(tx, result).await
    }
}

impl CreatePullRequest {
    async fn run_in_transaction(
        &self,
        ctx: &CoreContext<'_>,
        tx: &dyn DbTransaction,
        pull_request_id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        if tx.pull_requests_get(pull_request_id).await?.is_some() {
            return Err(DomainError::PullRequestAlreadyExists {
                pull_request_id: pull_request_id.into(),
            });
        }

        let select_reviewers: &dyn SelectReviewersInterface = ctx.core_module.resolve_ref();
        let reviewers = select_reviewers.run(ctx, tx, author_id).await?;

        let pull_request = tx
            .pull_requests_create(PullRequest {
                id: pull_request_id.into(),
                name: name.into(),
                author_id: author_id.into(),
                status: PullRequestStatus::Open,
                assigned_reviewers: reviewers,
                created_at: OffsetDateTime::now_utc(),
                merged_at: None,
            })
            .await
            .map_err(|e| match e {
                // Lost a concurrent insert of the same id.
                DatabaseError::PullRequestAlreadyExists(pull_request_id) => {
                    DomainError::PullRequestAlreadyExists { pull_request_id }
                }
                e => e.into(),
            })?;

        info!(
            pull_request_id = pull_request_id,
            reviewers = ?pull_request.assigned_reviewers,
            message = "Pull request created"
        );

        Ok(pull_request)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reviewbot_database_interface::DbOperations;

    use super::*;
    use crate::{
        context::tests::{seed_team, CoreContextTest},
        use_cases::reviews::MockSelectReviewersInterface,
        CoreModule,
    };

    #[tokio::test]
    async fn create_with_two_reviewers() {
        let ctx = CoreContextTest::new();
        seed_team(
            &ctx.db_service,
            "payments",
            &[("u1", true), ("u2", true), ("u3", true), ("u4", true)],
        )
        .await;

        let pr = CreatePullRequest
            .run(&ctx.as_context(), "pr-1", "Add payments", "u1")
            .await
            .unwrap();

        assert_eq!(pr.status, PullRequestStatus::Open);
        assert_eq!(pr.assigned_reviewers.len(), 2);
        assert!(!pr.has_reviewer("u1"));
        assert_eq!(pr.merged_at, None);
        assert_eq!(ctx.db_service.pull_requests_get_expect("pr-1").await.unwrap(), pr);
    }

    #[tokio::test]
    async fn create_without_teammates() {
        let ctx = CoreContextTest::new();
        seed_team(&ctx.db_service, "payments", &[("u1", true), ("u2", false)]).await;

        let pr = CreatePullRequest
            .run(&ctx.as_context(), "pr-1", "Add payments", "u1")
            .await
            .unwrap();

        assert!(pr.assigned_reviewers.is_empty());
    }

    #[tokio::test]
    async fn uses_selected_reviewers() {
        let mut ctx = CoreContextTest::new();
        seed_team(
            &ctx.db_service,
            "payments",
            &[("u1", true), ("u2", true), ("u3", true)],
        )
        .await;

        let select_reviewers = {
            let mut mock = MockSelectReviewersInterface::new();
            mock.expect_run()
                .once()
                .withf(|_, _, author_id| author_id == "u1")
                .return_once(|_, _, _| Ok(vec!["u3".into(), "u2".into()]));
            mock
        };

        ctx.core_module = CoreModule::builder()
            .with_component_override::<dyn SelectReviewersInterface>(Box::new(select_reviewers))
            .build();

        let pr = CreatePullRequest
            .run(&ctx.as_context(), "pr-1", "Add payments", "u1")
            .await
            .unwrap();

        assert_eq!(pr.assigned_reviewers, vec!["u3", "u2"]);
    }

    #[tokio::test]
    async fn already_exists() {
        let ctx = CoreContextTest::new();
        seed_team(&ctx.db_service, "payments", &[("u1", true), ("u2", true)]).await;

        CreatePullRequest
            .run(&ctx.as_context(), "pr-1", "Add payments", "u1")
            .await
            .unwrap();

        assert!(matches!(
            CreatePullRequest
                .run(&ctx.as_context(), "pr-1", "Again", "u2")
                .await,
            Err(DomainError::PullRequestAlreadyExists { pull_request_id }) if pull_request_id == "pr-1"
        ));
    }

    #[tokio::test]
    async fn concurrent_creates_with_same_id() {
        let ctx = CoreContextTest::new();
        seed_team(
            &ctx.db_service,
            "payments",
            &[("u1", true), ("u2", true), ("u3", true)],
        )
        .await;

        let context = ctx.as_context();
        let (first, second) = tokio::join!(
            CreatePullRequest.run(&context, "pr-1", "Add payments", "u1"),
            CreatePullRequest.run(&context, "pr-1", "Add payments too", "u2"),
        );

        let (created, rejected) = match (first, second) {
            (Ok(created), Err(e)) | (Err(e), Ok(created)) => (created, e),
            (first, second) => panic!("expected a single success, got {first:?} and {second:?}"),
        };
        assert!(matches!(
            rejected,
            DomainError::PullRequestAlreadyExists { pull_request_id } if pull_request_id == "pr-1"
        ));
        assert_eq!(ctx.db_service.pull_requests_all().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn insert_lost_inside_transaction() {
        let mut ctx = CoreContextTest::new();
        seed_team(&ctx.db_service, "payments", &[("u1", true), ("u2", true)]).await;

        // The same id lands between the existence check and the insert.
        let select_reviewers = {
            let mut mock = MockSelectReviewersInterface::new();
            mock.expect_run().once().return_once(|_, tx, _| {
                futures::executor::block_on(tx.pull_requests_create(PullRequest {
                    id: "pr-1".into(),
                    name: "Concurrent".into(),
                    author_id: "u2".into(),
                    status: PullRequestStatus::Open,
                    assigned_reviewers: vec![],
                    created_at: OffsetDateTime::now_utc(),
                    merged_at: None,
                }))?;
                Ok(vec!["u2".into()])
            });
            mock
        };

        ctx.core_module = CoreModule::builder()
            .with_component_override::<dyn SelectReviewersInterface>(Box::new(select_reviewers))
            .build();

        assert!(matches!(
            CreatePullRequest
                .run(&ctx.as_context(), "pr-1", "Add payments", "u1")
                .await,
            Err(DomainError::PullRequestAlreadyExists { pull_request_id }) if pull_request_id == "pr-1"
        ));
        assert!(ctx.db_service.pull_requests_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_author() {
        let ctx = CoreContextTest::new();

        assert!(matches!(
            CreatePullRequest
                .run(&ctx.as_context(), "pr-1", "Add payments", "ghost")
                .await,
            Err(DomainError::AuthorNotFound { .. })
        ));
        assert!(ctx.db_service.pull_requests_all().await.unwrap().is_empty());
    }
}
