use reviewbot_database_interface::DatabaseError;
use reviewbot_models::User;
use tracing::info;

use crate::{transaction::finish_transaction, CoreContext, DomainError, Result};

/// Toggle the active flag of a user. Existing assignments are left untouched.
pub struct SetUserIsActive;

impl SetUserIsActive {
    #[tracing::instrument(skip(self, ctx), ret)]
    pub async fn run(&self, ctx: &CoreContext<'_>, user_id: &str, is_active: bool) -> Result<User> {
        let tx = ctx.db_service.begin().await?;
        let result = tx
            .users_set_is_active(user_id, is_active)
            .await
            .map_err(|e| match e {
                DatabaseError::UnknownUser(user_id) => DomainError::UserNotFound { user_id },
                e => e.into(),
            });

        let user = finish_transaction(tx, result).await?;
        info!(
            user_id = user.id,
            is_active = user.is_active,
            message = "Updated user activity"
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reviewbot_database_interface::DbOperations;

    use super::*;
    use crate::{
        context::tests::{seed_team, CoreContextTest},
        use_cases::pulls::{create_pull_request::CreatePullRequest, CreatePullRequestInterface},
    };

    #[tokio::test]
    async fn run() {
        let ctx = CoreContextTest::new();
        seed_team(&ctx.db_service, "payments", &[("u1", true)]).await;

        let user = SetUserIsActive
            .run(&ctx.as_context(), "u1", false)
            .await
            .unwrap();
        assert!(!user.is_active);
        assert!(!ctx.db_service.users_get_expect("u1").await.unwrap().is_active);

        let user = SetUserIsActive
            .run(&ctx.as_context(), "u1", true)
            .await
            .unwrap();
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn keeps_assignments() {
        let ctx = CoreContextTest::new();
        seed_team(&ctx.db_service, "payments", &[("u1", true), ("u2", true)]).await;
        CreatePullRequest
            .run(&ctx.as_context(), "pr-1", "Fix checkout", "u1")
            .await
            .unwrap();

        SetUserIsActive
            .run(&ctx.as_context(), "u2", false)
            .await
            .unwrap();

        assert_eq!(
            ctx.db_service
                .pull_requests_get_expect("pr-1")
                .await
                .unwrap()
                .assigned_reviewers,
            vec!["u2"]
        );
    }

    #[tokio::test]
    async fn unknown_user() {
        let ctx = CoreContextTest::new();

        assert!(matches!(
            SetUserIsActive.run(&ctx.as_context(), "ghost", false).await,
            Err(DomainError::UserNotFound { user_id }) if user_id == "ghost"
        ));
    }
}
