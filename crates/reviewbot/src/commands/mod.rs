//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use reviewbot_config::Config;
use reviewbot_core::{CoreContext, CoreModule, RandomService};
use reviewbot_database_interface::DbService;
use tokio::sync::RwLock;

use self::{
    pull_request::PullRequestCommand, server::ServerCommand, stats::StatsCommand,
    teams::TeamCommand,
};
use crate::Result;

mod pull_request;
mod server;
mod stats;
mod teams;

pub(crate) struct CommandContext {
    pub config: Config,
    pub db_service: Box<dyn DbService>,
    pub random_service: Box<dyn RandomService>,
    pub core_module: CoreModule,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

impl CommandContext {
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
            random_service: self.random_service.as_ref(),
        }
    }
}

#[async_trait(?Send)]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Teams(TeamCommand),
    PullRequests(PullRequestCommand),
    Stats(StatsCommand),
}

#[async_trait(?Send)]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Teams(sub) => sub.execute(ctx).await,
            Self::PullRequests(sub) => sub.execute(ctx).await,
            Self::Stats(sub) => sub.execute(ctx).await,
        }
    }
}
