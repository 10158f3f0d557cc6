//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which user store backs authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthBackend {
    /// Users live in the `users` table
    Postgres,
    /// Mutable in-memory store seeded with the default dev users
    Memory,
}

/// Server configuration, loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for API authentication
    pub jwt_secret: String,
    /// Authentication backend selection
    pub auth_backend: AuthBackend,
    /// Insert default users/customers/products into empty tables at startup
    pub seed_data: bool,
    /// Restore line-item stock when an order is cancelled (off by default)
    pub restock_on_cancel: bool,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn env_flag(name: &str, default: bool) -> bool {
        std::env::var(name)
            .ok()
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let auth_backend = match std::env::var("AUTH_BACKEND").as_deref() {
            Ok("memory") => AuthBackend::Memory,
            _ => AuthBackend::Postgres,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            auth_backend,
            seed_data: Self::env_flag("SEED_DATA", environment == "development"),
            restock_on_cancel: Self::env_flag("RESTOCK_ON_CANCEL", false),
            environment,
        })
    }
}
