//! Server module.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use reviewbot_config::Config;
use reviewbot_core::{CoreContext, CoreModule, RandomService, SeededRandomService};
use reviewbot_database_interface::DbService;
use tracing::info;

use crate::{
    health::health_check_route, pulls::configure_pull_request_handlers,
    stats::configure_stats_handlers, teams::configure_team_handlers,
    users::configure_user_handlers, Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Database service.
    pub db_service: Box<dyn DbService>,
    /// Random source used for reviewer selection.
    pub random_service: Box<dyn RandomService>,
}

impl AppContext {
    /// Create new app context, seeding the random source from configuration.
    pub fn new(config: Config, db_service: Box<dyn DbService>) -> Self {
        Self {
            random_service: Box::new(SeededRandomService::new(config.random_seed)),
            core_module: CoreModule::builder().build(),
            config,
            db_service,
        }
    }

    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        db_service: Box<dyn DbService>,
        random_service: Box<dyn RandomService>,
    ) -> Self {
        Self {
            config,
            core_module,
            db_service,
            random_service,
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
            random_service: self.random_service.as_ref(),
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context)
        .wrap(Logger::default())
        .service(web::scope("/team").configure(configure_team_handlers))
        .service(web::scope("/users").configure(configure_user_handlers))
        .service(web::scope("/pullRequest").configure(configure_pull_request_handlers))
        .configure(configure_stats_handlers)
        .route("/health", web::get().to(health_check_route))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            // Invalid JSON data
            ServerError::BadRequest {
                message: err.to_string(),
            }
            .into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            ServerError::BadRequest {
                message: err.to_string(),
            }
            .into()
        }))
}

/// Run bot server.
pub async fn run_bot_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        message = "Starting review server",
    );

    run_bot_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_bot_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let cloned_context = context.clone();

    let mut server = HttpServer::new(move || build_actix_app(context.clone()));

    if let Some(workers) = cloned_context.config.server.workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
