use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod db;
mod domain;
mod error;
mod rest;
mod storage;

use config::AppConfig;
use domain::email_service::EmailService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    info!("Setting up database");
    let db = db::DbConnection::new(&config.database_url).await?;

    let email = EmailService::new(config.email.clone())?;
    let state = rest::AppState::new(db, email);

    if let Some(seed) = &config.admin {
        state
            .auth
            .ensure_admin(&seed.username, &seed.password, &seed.email)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed the admin account: {e}"))?;
    }

    // CORS setup to allow a browser frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH])
        .allow_headers(Any);

    let app = rest::router(state).layer(cors);

    let addr: SocketAddr = config.bind_addr.parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
