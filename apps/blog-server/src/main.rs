//! # Quill Blog Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use quill_core::ports::{Clock, PasswordService, SystemClock, TokenService};
use quill_infra::{Argon2PasswordService, JwtTokenService};

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::login_redirect::login_redirect;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Quill Blog Server on {}:{}",
        config.host,
        config.port
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());

    let state = web::Data::new(AppState::new(config.database.as_ref(), passwords, clock).await);
    let tokens = web::Data::new(tokens);
    let app_config = web::Data::new(config.clone());

    HttpServer::new(move || {
        App::new()
            .wrap(login_redirect())
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .app_data(tokens.clone())
            .app_data(app_config.clone())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
