//! Application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::store::{MemoryUserStore, PgUserStore, UserStore};
use crate::config::{AuthBackend, Config};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// User store strategy (postgres or in-memory)
    pub users: Arc<dyn UserStore>,
    /// JWT secret for API authentication
    pub jwt_secret: String,
    /// Restore stock when an order transitions to CANCELLED
    pub restock_on_cancel: bool,
}

impl AppState {
    /// Create a new AppState: connect, migrate, pick the user store.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let users: Arc<dyn UserStore> = match config.auth_backend {
            AuthBackend::Postgres => Arc::new(PgUserStore::new(pool.clone())),
            AuthBackend::Memory => {
                tracing::info!("using in-memory user store with default dev users");
                Arc::new(MemoryUserStore::with_default_users()?)
            }
        };

        Ok(Self {
            pool,
            users,
            jwt_secret: config.jwt_secret.clone(),
            restock_on_cancel: config.restock_on_cancel,
        })
    }
}
