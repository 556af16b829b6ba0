//! Configuration module
//!
//! - `auth` - signing secret, password hashing and store timeouts
//! - `database` - MySQL connection and pool configuration
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

pub use auth::{AuthConfig, JwtConfig, PasswordConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations.
///
/// Not serializable: the signing secret must never round-trip through a
/// config dump.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration; `None` selects the in-memory stores
    pub database: Option<DatabaseConfig>,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source and validate it
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(&lookup);
        let auth = AuthConfig::from_lookup(&lookup);
        auth.validate(environment)?;

        let database = DatabaseConfig::from_lookup(&lookup);
        if database.is_none() && !environment.is_development() {
            return Err(format!(
                "DATABASE_URL must be set in the {} environment",
                environment
            ));
        }

        let cors = if environment.is_development() {
            CorsConfig::development()
        } else {
            CorsConfig::from_lookup(&lookup)
        };

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(&lookup)?,
            database,
            auth,
            cors,
            logging: LoggingConfig::from_lookup(environment, &lookup),
        })
    }
}
