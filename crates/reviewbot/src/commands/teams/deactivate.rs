use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::teams::DeactivateTeamMembersInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Deactivate team members and hand their open reviews over
#[derive(Parser)]
pub(crate) struct TeamDeactivateCommand {
    /// Team name
    team_name: String,

    /// Members to deactivate
    #[arg(required = true)]
    user_ids: Vec<String>,
}

#[async_trait(?Send)]
impl Command for TeamDeactivateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let deactivate_team_members: &dyn DeactivateTeamMembersInterface =
            ctx.core_module.resolve_ref();
        let result = deactivate_team_members
            .run(&ctx.as_core_context(), &self.team_name, &self.user_ids)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Deactivated {} member(s) of team '{}': {} review(s) affected, {} reassigned.",
            result.deactivated_count,
            result.team_name,
            result.affected_pull_request_count,
            result.reassigned_reviewers_count
        )?;

        Ok(())
    }
}
