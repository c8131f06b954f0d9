//! # NC News Binary
//!
//! The entry point that assembles the application based on compile-time features.

use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use nc_api::{configure_routes, handlers, middleware, AppState};
use nc_config::Settings;

#[cfg(feature = "db-postgres")]
use nc_db_postgres::PgNewsRepo;

#[cfg(not(feature = "db-postgres"))]
compile_error!("nc-news needs a database plugin; enable the `db-postgres` feature");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&settings.log.filter));

    // 1. Initialize Database Implementation
    let database_url = settings.database_url()?;
    log::info!("connecting to {}", settings.redacted_database_url());
    #[cfg(feature = "db-postgres")]
    let repo = {
        let repo = PgNewsRepo::connect(
            database_url,
            settings.database.max_connections,
            Duration::from_secs(settings.database.acquire_timeout_secs),
        )
        .await?;
        if settings.database.run_migrations {
            repo.migrate().await?;
            log::info!("migrations applied");
        }
        repo
    };

    // 2. Wrap in AppState (dynamic dispatch keeps the API crate plugin-agnostic)
    let state = web::Data::new(AppState::new(repo));

    let (host, port) = settings.bind_address();
    log::info!("NC News listening on http://{host}:{port}");

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::cors_policy())
            .wrap(middleware::standard_middleware())
            .configure(configure_routes)
            .default_service(web::to(handlers::not_found))
    });
    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server
        .bind((host.as_str(), port))
        .with_context(|| format!("failed to bind {host}:{port}"))?
        .run()
        .await
        .context("server terminated abnormally")
}
