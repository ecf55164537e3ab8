use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::teams::GetTeam;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show team members
#[derive(Parser)]
pub(crate) struct TeamShowCommand {
    /// Team name
    team_name: String,
}

#[async_trait(?Send)]
impl Command for TeamShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let team = GetTeam
            .run(&ctx.as_core_context(), &self.team_name)
            .await?;
        let mut writer = ctx.writer.write().await;

        writeln!(
            writer,
            "Team '{}' ({} members):",
            team.team.name,
            team.members.len()
        )?;
        for member in &team.members {
            writeln!(
                writer,
                "  - {} ({}), {}",
                member.id,
                member.username,
                if member.is_active { "active" } else { "inactive" }
            )?;
        }

        Ok(())
    }
}
