use std::sync::Arc;

use clap::Parser;
use reviewbot_config::{Config, DatabaseDriver};
use reviewbot_core::{CoreModule, RandomService, SeededRandomService};
use reviewbot_database_interface::DbService;
use reviewbot_database_memory::MemoryDb;
use reviewbot_database_pg::PostgresDb;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(version, about = "Pull request reviewer assignment service", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let core_module = CoreModule::builder().build();
            let db_service: Box<dyn DbService> = {
                info!(driver = %config.database.driver, message = "Using database driver");

                match config.database.driver {
                    DatabaseDriver::Postgres => Box::new(PostgresDb::connect(&config).await?),
                    DatabaseDriver::Memory => Box::new(MemoryDb::new()),
                }
            };

            let random_service: Box<dyn RandomService> =
                Box::new(SeededRandomService::new(config.random_seed));

            let ctx = CommandContext {
                config,
                db_service,
                random_service,
                core_module,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            Self::parse_args_async(args, ctx).await
        };

        actix_rt::System::with_tokio_rt(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
        })
        .block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
