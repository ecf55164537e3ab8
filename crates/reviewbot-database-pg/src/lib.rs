//! PostgreSQL storage backend.

mod fields;
mod postgres;
mod queries;
mod row;
mod utils;

use std::{ops::Deref, time::Duration};

use reviewbot_config::Config;
use reviewbot_database_interface::{DatabaseError, Result};
use sqlx::{
    migrate::{Migrate, Migrator},
    postgres::PgPoolOptions,
    Acquire, PgPool,
};
use tracing::info;

pub use postgres::{PgTransaction, PostgresDb};
pub use utils::TestDatabase;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply pending migrations, on a pool or a single connection.
pub async fn run_migrations<'a, A>(migrator: A) -> Result<()>
where
    A: Acquire<'a>,
    <A::Connection as Deref>::Target: Migrate,
{
    info!(
        known_migrations = MIGRATOR.iter().count(),
        message = "Applying database migrations"
    );

    MIGRATOR
        .run(migrator)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
}

pub async fn establish_pool_connection(config: &Config) -> Result<PgPool> {
    let pg = &config.database.pg;
    info!(
        pool_size = pg.pool_size,
        connection_timeout = pg.connection_timeout,
        message = "Connecting to PostgreSQL"
    );

    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(pg.connection_timeout.into()))
        .max_connections(pg.pool_size)
        .connect(&pg.url)
        .await
        .map_err(queries::wrap_error)
}
