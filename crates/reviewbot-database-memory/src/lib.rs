mod state;

use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use reviewbot_database_interface::{
    DatabaseError, DbOperations, DbService, DbTransaction, Result,
};
use reviewbot_models::{OpenReviewAssignment, PullRequest, PullRequestReviewer, Team, User};
use state::MemoryState;
use time::OffsetDateTime;
use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};

/// In-memory storage.
///
/// Transactions are serialized through a single gate. Direct calls skip the gate
/// and apply immediately, so a transaction that started before one of them fails
/// with [`DatabaseError::SerializationFailure`] on commit.
#[derive(Debug, Default)]
pub struct MemoryDb {
    gate: AsyncMutex<()>,
    state: RwLock<MemoryState>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    async fn with_state<R>(&self, f: impl FnOnce(&mut MemoryState) -> Result<R>) -> Result<R> {
        let mut state = self.state.write().unwrap();
        f(&mut state)
    }
}

/// Transaction working on a copy of the committed state.
pub struct MemoryTransaction<'a> {
    _guard: AsyncMutexGuard<'a, ()>,
    db: &'a MemoryDb,
    base: MemoryState,
    state: Mutex<MemoryState>,
}

impl<'a> MemoryTransaction<'a> {
    async fn with_state<R>(&self, f: impl FnOnce(&mut MemoryState) -> Result<R>) -> Result<R> {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn begin(&self) -> Result<Box<dyn DbTransaction + '_>> {
        let guard = self.gate.lock().await;
        let base = self.state.read().unwrap().clone();

        Ok(Box::new(MemoryTransaction {
            _guard: guard,
            db: self,
            state: Mutex::new(base.clone()),
            base,
        }))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<'a> DbTransaction for MemoryTransaction<'a> {
    async fn commit(self: Box<Self>) -> Result<()> {
        let state = self.state.into_inner().unwrap();
        let mut committed = self.db.state.write().unwrap();
        if *committed != self.base {
            return Err(DatabaseError::SerializationFailure);
        }

        *committed = state;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

macro_rules! memory_db_operations {
    (<$lt:lifetime> $ty:ty) => {
        memory_db_operations!(@impl [$lt] $ty);
    };
    ($ty:ty) => {
        memory_db_operations!(@impl [] $ty);
    };
    (@impl [$($lt:lifetime)?] $ty:ty) => {
        #[async_trait]
        impl$(<$lt>)? DbOperations for $ty {
            async fn teams_create(&self, instance: Team) -> Result<Team> {
                self.with_state(|s| s.teams_create(instance)).await
            }

            async fn teams_get(&self, name: &str) -> Result<Option<Team>> {
                self.with_state(|s| Ok(s.teams_get(name))).await
            }

            async fn teams_all(&self) -> Result<Vec<Team>> {
                self.with_state(|s| Ok(s.teams_all())).await
            }

            async fn users_create(&self, instance: User) -> Result<User> {
                self.with_state(|s| s.users_create(instance)).await
            }

            async fn users_get(&self, id: &str) -> Result<Option<User>> {
                self.with_state(|s| Ok(s.users_get(id))).await
            }

            async fn users_all(&self) -> Result<Vec<User>> {
                self.with_state(|s| Ok(s.users_all())).await
            }

            async fn users_list_team_members(&self, team_name: &str) -> Result<Vec<User>> {
                self.with_state(|s| Ok(s.users_list_team_members(team_name, false)))
                    .await
            }

            async fn users_list_active_team_members(&self, team_name: &str) -> Result<Vec<User>> {
                self.with_state(|s| Ok(s.users_list_team_members(team_name, true)))
                    .await
            }

            async fn users_set_is_active(&self, id: &str, value: bool) -> Result<User> {
                self.with_state(|s| s.users_set_is_active(id, value)).await
            }

            async fn users_deactivate_team_members(
                &self,
                team_name: &str,
                ids: &[String],
            ) -> Result<Vec<String>> {
                self.with_state(|s| Ok(s.users_deactivate_team_members(team_name, ids)))
                    .await
            }

            async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
                self.with_state(|s| s.pull_requests_create(instance)).await
            }

            async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>> {
                self.with_state(|s| Ok(s.pull_requests_get(id))).await
            }

            async fn pull_requests_all(&self) -> Result<Vec<PullRequest>> {
                self.with_state(|s| Ok(s.pull_requests_all())).await
            }

            async fn pull_requests_list_for_reviewer(
                &self,
                reviewer_id: &str,
            ) -> Result<Vec<PullRequest>> {
                self.with_state(|s| Ok(s.pull_requests_list_for_reviewer(reviewer_id)))
                    .await
            }

            async fn pull_requests_set_merged(
                &self,
                id: &str,
                merged_at: OffsetDateTime,
            ) -> Result<PullRequest> {
                self.with_state(|s| s.pull_requests_set_merged(id, merged_at))
                    .await
            }

            async fn pull_request_reviewers_create(
                &self,
                instance: PullRequestReviewer,
            ) -> Result<PullRequestReviewer> {
                self.with_state(|s| s.pull_request_reviewers_create(instance))
                    .await
            }

            async fn pull_request_reviewers_list(
                &self,
                pull_request_id: &str,
            ) -> Result<Vec<PullRequestReviewer>> {
                self.with_state(|s| Ok(s.pull_request_reviewers_list(pull_request_id)))
                    .await
            }

            async fn pull_request_reviewers_all(&self) -> Result<Vec<PullRequestReviewer>> {
                self.with_state(|s| Ok(s.pull_request_reviewers_all())).await
            }

            async fn pull_request_reviewers_list_open_for_reviewers(
                &self,
                reviewer_ids: &[String],
            ) -> Result<Vec<OpenReviewAssignment>> {
                self.with_state(|s| {
                    Ok(s.pull_request_reviewers_list_open_for_reviewers(reviewer_ids))
                })
                .await
            }

            async fn pull_request_reviewers_replace(
                &self,
                pull_request_id: &str,
                old_reviewer_id: &str,
                new_reviewer_id: &str,
            ) -> Result<bool> {
                self.with_state(|s| {
                    s.pull_request_reviewers_replace(
                        pull_request_id,
                        old_reviewer_id,
                        new_reviewer_id,
                    )
                })
                .await
            }

            async fn pull_request_reviewers_delete(
                &self,
                pull_request_id: &str,
                reviewer_id: &str,
            ) -> Result<bool> {
                self.with_state(|s| Ok(s.pull_request_reviewers_delete(pull_request_id, reviewer_id)))
                    .await
            }
        }
    };
}

memory_db_operations!(MemoryDb);
memory_db_operations!(<'a> MemoryTransaction<'a>);
