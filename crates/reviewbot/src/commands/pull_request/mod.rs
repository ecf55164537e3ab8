use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod merge;
mod show;

use self::{merge::PullRequestMergeCommand, show::PullRequestShowCommand};

/// Manage pull requests
#[derive(Parser)]
pub(crate) struct PullRequestCommand {
    #[clap(subcommand)]
    inner: PullRequestSubCommand,
}

#[async_trait(?Send)]
impl Command for PullRequestCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
pub(crate) enum PullRequestSubCommand {
    Show(PullRequestShowCommand),
    Merge(PullRequestMergeCommand),
}

#[async_trait(?Send)]
impl Command for PullRequestSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Show(sub) => sub.execute(ctx).await,
            Self::Merge(sub) => sub.execute(ctx).await,
        }
    }
}
