use reviewbot_database_interface::{DatabaseError, DbTransaction};
use reviewbot_models::{Team, TeamWithMembers, User};

use crate::{transaction::finish_transaction, CoreContext, DomainError, Result};

/// Create a team, creating or moving its members into it.
pub struct AddTeam;

impl AddTeam {
    #[tracing::instrument(skip(self, ctx, members), fields(members_count = members.len()))]
    pub async fn run(
        &self,
        ctx: &CoreContext<'_>,
        team_name: &str,
        members: Vec<User>,
    ) -> Result<TeamWithMembers> {
        let tx = ctx.db_service.begin().await?;
        let result = self
            .run_in_transaction(tx.as_ref(), team_name, members)
            .await;

        finish_transaction(tx, result).await
    }

    async fn run_in_transaction(
        &self,
        tx: &dyn DbTransaction,
        team_name: &str,
        members: Vec<User>,
    ) -> Result<TeamWithMembers> {
        let team = tx
            .teams_create(Team {
                name: team_name.into(),
            })
            .await
            .map_err(|e| match e {
                DatabaseError::TeamAlreadyExists(team_name) => {
                    DomainError::TeamAlreadyExists { team_name }
                }
                e => e.into(),
            })?;

        let mut created = Vec::with_capacity(members.len());
        for member in members {
            created.push(tx.users_create(member.with_team(team_name)).await?);
        }

        Ok(TeamWithMembers {
            team,
            members: created,
        })
    }
}
