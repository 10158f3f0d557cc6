//! store-server — order-management backend for a small storefront
//!
//! Long-running HTTP service providing:
//! - Product catalog CRUD (public storefront reads, admin mutations)
//! - Customer order placement with atomic stock reservation
//! - Role-gated order status transitions
//! - Filtered, paginated order listing
//! - Username/password authentication issuing bearer tokens

mod api;
mod auth;
mod config;
mod db;
mod orders;
mod seed;
mod state;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "store_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting store-server (env: {})", config.environment);

    // Initialize application state (pool, migrations, user store)
    let state = AppState::new(&config).await?;

    if config.seed_data {
        seed::run(&state.pool).await?;
    }

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("store-server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
