use reviewbot_models::TeamWithMembers;

use crate::{transaction::finish_transaction, CoreContext, DomainError, Result};

pub struct GetTeam;

impl GetTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    pub async fn run(&self, ctx: &CoreContext<'_>, team_name: &str) -> Result<TeamWithMembers> {
        let tx = ctx.db_service.begin().await?;
        let result: Result<_> = async {
            let team =
                tx.teams_get(team_name)
                    .await?
                    .ok_or_else(|| DomainError::TeamNotFound {
                        team_name: team_name.into(),
                    })?;
            let members = tx.users_list_team_members(team_name).await?;

            Ok(TeamWithMembers { team, members })
        }
        .await;

        finish_transaction(tx, result).await
    }
}
