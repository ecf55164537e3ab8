use reviewbot_config::Config;
use reviewbot_database_interface::Result;
use sqlx::{postgres::PgPoolOptions, Connection, PgConnection, PgPool};

use crate::{queries::wrap_error, run_migrations};

const TEST_DATABASE_PREFIX: &str = "reviewbot_test_";
const MAINTENANCE_DATABASE: &str = "postgres";

/// Throwaway database living next to the configured one, for backend tests.
#[derive(Debug, Clone)]
pub struct TestDatabase {
    server_url: String,
    name: String,
}

impl TestDatabase {
    pub fn new(database_url: &str, test_name: &str) -> Self {
        Self {
            server_url: server_url(database_url),
            name: format!("{TEST_DATABASE_PREFIX}{test_name}"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> String {
        format!("{}/{}", self.server_url, self.name)
    }

    /// Drop any leftover copy, then create and migrate a fresh one.
    pub async fn setup(&self) -> Result<()> {
        let mut conn = self.maintenance_connection().await?;
        self.drop_with(&mut conn).await?;
        sqlx::query(&format!(r#"CREATE DATABASE "{}";"#, self.name))
            .execute(&mut conn)
            .await
            .map_err(wrap_error)?;

        let mut conn = PgConnection::connect(&self.url())
            .await
            .map_err(wrap_error)?;
        run_migrations(&mut conn).await
    }

    pub async fn pool(&self, config: &Config) -> Result<PgPool> {
        PgPoolOptions::new()
            .max_connections(config.database.pg.pool_size)
            .connect(&self.url())
            .await
            .map_err(wrap_error)
    }

    pub async fn teardown(&self) -> Result<()> {
        let mut conn = self.maintenance_connection().await?;
        self.drop_with(&mut conn).await
    }

    async fn maintenance_connection(&self) -> Result<PgConnection> {
        PgConnection::connect(&format!("{}/{MAINTENANCE_DATABASE}", self.server_url))
            .await
            .map_err(wrap_error)
    }

    async fn drop_with(&self, conn: &mut PgConnection) -> Result<()> {
        // Pools from a crashed run may still hold connections.
        sqlx::query(
            r#"
            SELECT pg_terminate_backend(pid)
            FROM pg_stat_activity
            WHERE datname = $1 AND pid <> pg_backend_pid();
            "#,
        )
        .bind(&self.name)
        .execute(&mut *conn)
        .await
        .map_err(wrap_error)?;

        sqlx::query(&format!(r#"DROP DATABASE IF EXISTS "{}";"#, self.name))
            .execute(&mut *conn)
            .await
            .map_err(wrap_error)?;

        Ok(())
    }
}

fn server_url(database_url: &str) -> String {
    match database_url.rsplit_once('/') {
        Some((server, _)) if server.contains("://") && !server.ends_with('/') => server.into(),
        _ => database_url.trim_end_matches('/').into(),
    }
}
