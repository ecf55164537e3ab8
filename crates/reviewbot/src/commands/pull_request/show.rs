use anyhow::anyhow;
use async_trait::async_trait;
use clap::Parser;
use reviewbot_database_interface::DbOperations;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show pull request info
#[derive(Parser)]
pub(crate) struct PullRequestShowCommand {
    /// Pull request id
    pull_request_id: String,
}

#[async_trait(?Send)]
impl Command for PullRequestShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let pr = ctx
            .db_service
            .pull_requests_get(&self.pull_request_id)
            .await?
            .ok_or_else(|| anyhow!("Unknown pull request '{}'", self.pull_request_id))?;

        writeln!(
            ctx.writer.write().await,
            "Accessing pull request '{}':",
            self.pull_request_id
        )?;
        writeln!(ctx.writer.write().await, "{:#?}", pr)?;

        Ok(())
    }
}
