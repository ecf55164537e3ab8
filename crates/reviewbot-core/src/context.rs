use reviewbot_config::Config;
use reviewbot_database_interface::DbService;

use crate::{random::RandomService, CoreModule};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub db_service: &'a (dyn DbService + 'a),
    pub random_service: &'a (dyn RandomService + 'a),
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use reviewbot_config::Config;
    use reviewbot_database_interface::{DbOperations, DbService};
    use reviewbot_database_memory::MemoryDb;
    use reviewbot_models::{Team, User};

    use crate::{
        random::{RandomService, SeededRandomService},
        CoreContext, CoreModule,
    };

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub db_service: MemoryDb,
        pub random_service: Box<dyn RandomService>,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            let mut config = Config::from_env_no_version();
            config.max_reviewers = 2;
            config.random_seed = 1;

            Self {
                random_service: Box::new(SeededRandomService::new(config.random_seed)),
                config,
                core_module: CoreModule::builder().build(),
                db_service: MemoryDb::new(),
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                db_service: &self.db_service,
                random_service: self.random_service.as_ref(),
            }
        }
    }

    /// Create a team with `(id, is_active)` members.
    #[allow(dead_code)]
    pub async fn seed_team(db: &dyn DbService, team_name: &str, members: &[(&str, bool)]) {
        db.teams_create(Team {
            name: team_name.into(),
        })
        .await
        .unwrap();

        for (id, is_active) in members {
            db.users_create(User {
                id: (*id).into(),
                username: format!("user-{id}"),
                team_name: Some(team_name.into()),
                is_active: *is_active,
            })
            .await
            .unwrap();
        }
    }
}
