use std::{io::Write, sync::Arc};

use clap::Parser;
use reviewbot_config::Config;
use reviewbot_core::{
    use_cases::pulls::CreatePullRequestInterface, CoreContext, CoreModule, RandomService,
    SeededRandomService,
};
use reviewbot_database_interface::DbOperations;
use reviewbot_database_memory::MemoryDb;
use reviewbot_models::{Team, User};
use shaku::HasComponent;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub db_service: MemoryDb,
    pub random_service: Box<dyn RandomService>,
}

impl CommandContextTest {
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

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            db_service: Box::new(self.db_service),
            random_service: self.random_service,
            writer,
        }
    }

    /// Create a pull request through the regular reviewer selection.
    pub async fn create_pull_request(&self, pull_request_id: &str, author_id: &str) {
        let ctx = CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: &self.db_service,
            random_service: self.random_service.as_ref(),
        };

        let create_pull_request: &dyn CreatePullRequestInterface = self.core_module.resolve_ref();
        create_pull_request
            .run(&ctx, pull_request_id, "Fix checkout", author_id)
            .await
            .unwrap();
    }
}

/// Create a team with `(id, is_active)` members.
pub(crate) async fn seed_team(ctx: &CommandContextTest, team_name: &str, members: &[(&str, bool)]) {
    ctx.db_service
        .teams_create(Team {
            name: team_name.into(),
        })
        .await
        .unwrap();

    for (id, is_active) in members {
        ctx.db_service
            .users_create(User {
                id: (*id).into(),
                username: format!("user-{id}"),
                team_name: Some(team_name.into()),
                is_active: *is_active,
            })
            .await
            .unwrap();
    }
}

async fn run_command(
    ctx: CommandContextTest,
    command_args: &[&str],
) -> (anyhow::Result<()>, String) {
    let buf = Arc::new(RwLock::new(Vec::new()));

    let result = {
        let command_args = {
            let mut tmp_args = vec!["bot"];
            tmp_args.extend(command_args);
            tmp_args
        };

        match Args::try_parse_from(command_args) {
            Ok(args) => {
                CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone())).await
            }
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    };

    let vec = buf.read().await.to_vec();
    (result, std::str::from_utf8(&vec).unwrap().to_string())
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, output) = run_command(ctx, command_args).await;
    result.unwrap();
    output
}

/// Run a command expected to fail and return its error message.
pub(crate) async fn test_command_error(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, _) = run_command(ctx, command_args).await;
    result.unwrap_err().to_string()
}
