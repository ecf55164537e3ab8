use futures::Future;
use reviewbot_config::Config;
use reviewbot_database_interface::DbService;
use reviewbot_database_memory::MemoryDb;
use reviewbot_database_pg::{PostgresDb, TestDatabase};
use tracing::info;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Run a test block on the memory backend, then on PostgreSQL when a database URL is configured.
pub async fn db_test_case<F, Fut>(test_name: &str, block: F)
where
    F: Fn(Box<dyn DbService>) -> Fut,
    Fut: Future<Output = TestResult>,
{
    {
        // In memory
        let mem_db = Box::new(MemoryDb::new());
        info!("running memory test {test_name} ...");
        block(mem_db).await.unwrap();
    }

    db_test_case_pg(test_name, block).await;
}

pub async fn db_test_case_pg<F, Fut>(test_name: &str, block: F)
where
    F: Fn(Box<dyn DbService>) -> Fut,
    Fut: Future<Output = TestResult>,
{
    let mut config = Config::from_env_no_version();
    if config.database.pg.url.is_empty() {
        info!("skipping postgres test {test_name}, no database URL");
        return;
    }

    let test_db = TestDatabase::new(&config.database.pg.url, test_name);
    config.database.pg.url = test_db.url();
    config.database.pg.pool_size = 2;
    config.database.pg.connection_timeout = 5;

    test_db.setup().await.unwrap();

    let pool = test_db.pool(&config).await.unwrap();
    let pg_db = Box::new(PostgresDb::new(pool));
    info!("running postgres test {} ...", test_db.name());
    block(pg_db).await.unwrap();

    test_db.teardown().await.unwrap();
}
