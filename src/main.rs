use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;
use mockable::{Clock, DefaultClock};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

use leave_management::config::Config;
use leave_management::db::init_db;
use leave_management::dispatcher::{Services, leave_management_dispatcher};
use leave_management::docs::ApiDoc;
use leave_management::notification::LogEmailSender;
use leave_management::routes;
use leave_management::store::MySqlStore;

#[get("/")]
async fn index() -> impl Responder {
    "HR Leave Management"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await?;

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let store = Arc::new(MySqlStore::new(pool, clock.clone()));
    let dispatcher = leave_management_dispatcher(Services {
        leave_types: store.clone(),
        allocations: store.clone(),
        requests: store,
        emails: Arc::new(LogEmailSender::new(config.email.clone())),
        email_settings: config.email.clone(),
        clock,
    })?;
    info!("Dispatcher ready");

    let dispatcher = Data::new(dispatcher);
    let config_data = Data::new(config.clone());
    let server_addr = config.server_addr.clone();
    let shutdown = Data::new(CancellationToken::new());
    let server_shutdown = shutdown.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(dispatcher.clone())
            .app_data(config_data.clone())
            .app_data(server_shutdown.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(server_addr)?
    .disable_signals()
    .run();

    // In-flight operations stop at their next repository call once this fires
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if actix_web::rt::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            shutdown.cancel();
            handle.stop(true).await;
        }
    });

    server.await?;

    Ok(())
}
