//! Trauma triage service
//!
//! Main entry point for the triage HTTP service.

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;
use triage::{api, config};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading any settings
    dotenv::dotenv().ok();

    // Load configuration
    let config = config::load_config().context("Failed to load configuration")?;

    // Initialize logger
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Create app state
    let app_state = web::Data::new(api::AppState::from_config(&config));

    let address = format!("{}:{}", config.server.host, config.server.port);
    info!(%address, "starting triage service");

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            // Add app state
            .app_data(app_state.clone())
            // Request tracing
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            // API routes
            .configure(api::configure)
    })
    .bind(&address)
    .with_context(|| format!("Failed to bind {}", address))?
    .run()
    .await
    .context("Server error")
}
