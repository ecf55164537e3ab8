use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use reviewbot_database_interface::DbTransaction;
use reviewbot_models::DeactivationResult;
use shaku::{Component, Interface};
use tracing::info;

use crate::{transaction::finish_transaction, CoreContext, DomainError, Result};

/// Deactivate team members and hand their open reviews over to the remaining active members.
///
/// Replacements are deterministic: the first active member (by id) who is neither
/// the author nor already reviewing the pull request. Links without a candidate are dropped.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait DeactivateTeamMembersInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        user_ids: &[String],
    ) -> Result<DeactivationResult>;
}

#[derive(Component)]
#[shaku(interface = DeactivateTeamMembersInterface)]
pub(crate) struct DeactivateTeamMembers;

#[async_trait]
impl DeactivateTeamMembersInterface for DeactivateTeamMembers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        user_ids: &[String],
    ) -> Result<DeactivationResult> {
        let tx = ctx.db_service.begin().await?;
        let result = self
            .run_in_transaction(tx.as_ref(), team_name, user_ids)
            .await;

        finish_transaction(tx, result).await
    }
}

impl DeactivateTeamMembers {
    async fn run_in_transaction(
        &self,
        tx: &dyn DbTransaction,
        team_name: &str,
        user_ids: &[String],
    ) -> Result<DeactivationResult> {
        if tx.teams_get(team_name).await?.is_none() {
            return Err(DomainError::TeamNotFound {
                team_name: team_name.into(),
            });
        }

        let mut result = DeactivationResult::empty(team_name);
        if user_ids.is_empty() {
            return Ok(result);
        }

        let deactivated = tx
            .users_deactivate_team_members(team_name, user_ids)
            .await?;
        result.deactivated_count = deactivated.len();
        if deactivated.is_empty() {
            return Ok(result);
        }

        let candidates: Vec<String> = tx
            .users_list_active_team_members(team_name)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();

        let assignments = tx
            .pull_request_reviewers_list_open_for_reviewers(&deactivated)
            .await?;
        result.affected_pull_request_count = assignments.len();

        let mut assigned: HashMap<String, HashSet<String>> = HashMap::new();
        for assignment in assignments {
            if !assigned.contains_key(&assignment.pull_request_id) {
                let reviewers = tx
                    .pull_request_reviewers_list(&assignment.pull_request_id)
                    .await?
                    .into_iter()
                    .map(|r| r.reviewer_id)
                    .collect();
                assigned.insert(assignment.pull_request_id.clone(), reviewers);
            }

            let current = assigned
                .entry(assignment.pull_request_id.clone())
                .or_default();
            let replacement = candidates
                .iter()
                .find(|c| **c != assignment.author_id && !current.contains(*c));

            match replacement {
                Some(new_reviewer_id) => {
                    tx.pull_request_reviewers_replace(
                        &assignment.pull_request_id,
                        &assignment.reviewer_id,
                        new_reviewer_id,
                    )
                    .await?;
                    current.insert(new_reviewer_id.clone());
                    result.reassigned_reviewers_count += 1;
                }
                None => {
                    tx.pull_request_reviewers_delete(
                        &assignment.pull_request_id,
                        &assignment.reviewer_id,
                    )
                    .await?;
                }
            }

            current.remove(&assignment.reviewer_id);
        }

        info!(
            team_name = team_name,
            deactivated_count = result.deactivated_count,
            affected_pull_request_count = result.affected_pull_request_count,
            reassigned_reviewers_count = result.reassigned_reviewers_count,
            message = "Team members deactivated"
        );

        Ok(result)
    }
}
