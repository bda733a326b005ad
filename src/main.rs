mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod services;
mod water_quality;

use axum::{middleware::from_fn, routing::get, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{
    config::Config,
    services::{CsvStorage, SharedStorage},
};

fn app(storage: SharedStorage, config: Config) -> Router {
    // Session store setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_name("session");

    Router::new()
        // Public pages
        .route("/", get(handlers::serve_home_page))
        .route(
            "/login",
            get(handlers::serve_login_page).post(handlers::handle_login),
        )
        .route(
            "/signup",
            get(handlers::serve_signup_page).post(handlers::handle_signup),
        )
        .route("/logout", get(handlers::handle_logout))
        // Session-protected pages
        .route(
            "/analyze",
            get(handlers::serve_analyze_page).post(handlers::handle_analyze),
        )
        .route("/history", get(handlers::show_history))
        // Static files
        .nest_service("/static", ServeDir::new("static"))
        // Add middleware
        .layer(from_fn(middleware::require_auth))
        .layer(session_layer)
        // Add state
        .with_state((storage, config))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    let config = Config::load()?;

    // Ensure the data directory exists before the first write
    std::fs::create_dir_all(&config.storage.data_dir)?;
    let storage: SharedStorage = Arc::new(CsvStorage::new(&config.storage.data_dir));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = app(storage, config);

    tracing::info!("Server running on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
