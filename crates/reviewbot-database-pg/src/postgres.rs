use async_trait::async_trait;
use reviewbot_config::Config;
use reviewbot_database_interface::{DbOperations, DbService, DbTransaction, Result};
use reviewbot_models::{OpenReviewAssignment, PullRequest, PullRequestReviewer, Team, User};
use sqlx::{pool::PoolConnection, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::queries;

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration and apply pending migrations.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = crate::establish_pool_connection(config).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    async fn acquire(&self) -> Result<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .map_err(queries::wrap_error)
    }
}

/// Serializable transaction.
pub struct PgTransaction {
    tx: Mutex<Transaction<'static, Postgres>>,
}

#[async_trait]
impl DbService for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn begin(&self) -> Result<Box<dyn DbTransaction + '_>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(queries::wrap_error)?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE;")
            .execute(&mut *tx)
            .await
            .map_err(queries::wrap_error)?;

        Ok(Box::new(PgTransaction { tx: Mutex::new(tx) }))
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        let mut conn = self.acquire().await?;
        queries::health_check(&mut conn).await
    }
}

#[async_trait]
impl DbTransaction for PgTransaction {
    #[tracing::instrument(skip(self))]
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx
            .into_inner()
            .commit()
            .await
            .map_err(queries::wrap_error)
    }

    #[tracing::instrument(skip(self))]
    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx
            .into_inner()
            .rollback()
            .await
            .map_err(queries::wrap_error)
    }
}

macro_rules! pg_db_operations {
    ($ty:ty, |$this:ident| $acquire:expr) => {
        #[async_trait]
        impl DbOperations for $ty {
            #[tracing::instrument(skip(self))]
            async fn teams_create(&self, instance: Team) -> Result<Team> {
                let $this = self;
                let mut conn = $acquire;
                queries::teams_create(&mut conn, instance).await
            }

            #[tracing::instrument(skip(self))]
            async fn teams_get(&self, name: &str) -> Result<Option<Team>> {
                let $this = self;
                let mut conn = $acquire;
                queries::teams_get(&mut conn, name).await
            }

            #[tracing::instrument(skip(self))]
            async fn teams_all(&self) -> Result<Vec<Team>> {
                let $this = self;
                let mut conn = $acquire;
                queries::teams_all(&mut conn).await
            }

            #[tracing::instrument(skip(self))]
            async fn users_create(&self, instance: User) -> Result<User> {
                let $this = self;
                let mut conn = $acquire;
                queries::users_create(&mut conn, instance).await
            }

            #[tracing::instrument(skip(self))]
            async fn users_get(&self, id: &str) -> Result<Option<User>> {
                let $this = self;
                let mut conn = $acquire;
                queries::users_get(&mut conn, id).await
            }

            #[tracing::instrument(skip(self))]
            async fn users_all(&self) -> Result<Vec<User>> {
                let $this = self;
                let mut conn = $acquire;
                queries::users_all(&mut conn).await
            }

            #[tracing::instrument(skip(self))]
            async fn users_list_team_members(&self, team_name: &str) -> Result<Vec<User>> {
                let $this = self;
                let mut conn = $acquire;
                queries::users_list_team_members(&mut conn, team_name, false).await
            }

            #[tracing::instrument(skip(self))]
            async fn users_list_active_team_members(&self, team_name: &str) -> Result<Vec<User>> {
                let $this = self;
                let mut conn = $acquire;
                queries::users_list_team_members(&mut conn, team_name, true).await
            }

            #[tracing::instrument(skip(self))]
            async fn users_set_is_active(&self, id: &str, value: bool) -> Result<User> {
                let $this = self;
                let mut conn = $acquire;
                queries::users_set_is_active(&mut conn, id, value).await
            }

            #[tracing::instrument(skip(self))]
            async fn users_deactivate_team_members(
                &self,
                team_name: &str,
                ids: &[String],
            ) -> Result<Vec<String>> {
                let $this = self;
                let mut conn = $acquire;
                queries::users_deactivate_team_members(&mut conn, team_name, ids).await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_requests_create(&mut conn, instance).await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_requests_get(&mut conn, id).await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_requests_all(&self) -> Result<Vec<PullRequest>> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_requests_all(&mut conn).await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_requests_list_for_reviewer(
                &self,
                reviewer_id: &str,
            ) -> Result<Vec<PullRequest>> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_requests_list_for_reviewer(&mut conn, reviewer_id).await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_requests_set_merged(
                &self,
                id: &str,
                merged_at: OffsetDateTime,
            ) -> Result<PullRequest> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_requests_set_merged(&mut conn, id, merged_at).await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_request_reviewers_create(
                &self,
                instance: PullRequestReviewer,
            ) -> Result<PullRequestReviewer> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_request_reviewers_create(&mut conn, instance).await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_request_reviewers_list(
                &self,
                pull_request_id: &str,
            ) -> Result<Vec<PullRequestReviewer>> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_request_reviewers_list(&mut conn, pull_request_id).await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_request_reviewers_all(&self) -> Result<Vec<PullRequestReviewer>> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_request_reviewers_all(&mut conn).await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_request_reviewers_list_open_for_reviewers(
                &self,
                reviewer_ids: &[String],
            ) -> Result<Vec<OpenReviewAssignment>> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_request_reviewers_list_open_for_reviewers(&mut conn, reviewer_ids)
                    .await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_request_reviewers_replace(
                &self,
                pull_request_id: &str,
                old_reviewer_id: &str,
                new_reviewer_id: &str,
            ) -> Result<bool> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_request_reviewers_replace(
                    &mut conn,
                    pull_request_id,
                    old_reviewer_id,
                    new_reviewer_id,
                )
                .await
            }

            #[tracing::instrument(skip(self))]
            async fn pull_request_reviewers_delete(
                &self,
                pull_request_id: &str,
                reviewer_id: &str,
            ) -> Result<bool> {
                let $this = self;
                let mut conn = $acquire;
                queries::pull_request_reviewers_delete(&mut conn, pull_request_id, reviewer_id)
                    .await
            }
        }
    };
}

pg_db_operations!(PostgresDb, |db| db.acquire().await?);
pg_db_operations!(PgTransaction, |transaction| transaction.tx.lock().await);
