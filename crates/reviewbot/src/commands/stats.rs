use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::stats::GetStatistics;

use super::{Command, CommandContext};
use crate::Result;

/// Show assignment statistics
#[derive(Parser)]
pub(crate) struct StatsCommand;

#[async_trait(?Send)]
impl Command for StatsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let stats = GetStatistics.run(&ctx.as_core_context()).await?;
        let mut writer = ctx.writer.write().await;

        writeln!(
            writer,
            "Pull requests: {} open, {} merged.",
            stats.open_pull_requests_count, stats.merged_pull_requests_count
        )?;

        writeln!(writer, "Assignments by user:")?;
        if stats.assignments_by_user.is_empty() {
            writeln!(writer, "  None.")?;
        }
        for entry in &stats.assignments_by_user {
            writeln!(writer, "  - {}: {}", entry.user_id, entry.count)?;
        }

        writeln!(writer, "Assignments by pull request:")?;
        if stats.assignments_by_pull_request.is_empty() {
            writeln!(writer, "  None.")?;
        }
        for entry in &stats.assignments_by_pull_request {
            writeln!(writer, "  - {}: {}", entry.pull_request_id, entry.count)?;
        }

        Ok(())
    }
}
