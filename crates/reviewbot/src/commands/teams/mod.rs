use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod deactivate;
mod show;

use self::{deactivate::TeamDeactivateCommand, show::TeamShowCommand};

/// Manage teams
#[derive(Parser)]
pub(crate) struct TeamCommand {
    #[clap(subcommand)]
    inner: TeamSubCommand,
}

#[async_trait(?Send)]
impl Command for TeamCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
pub(crate) enum TeamSubCommand {
    Show(TeamShowCommand),
    Deactivate(TeamDeactivateCommand),
}

#[async_trait(?Send)]
impl Command for TeamSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Show(sub) => sub.execute(ctx).await,
            Self::Deactivate(sub) => sub.execute(ctx).await,
        }
    }
}
