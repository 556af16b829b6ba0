//! Authentication and session configuration

use secrecy::{ExposeSecret, SecretString};

use super::environment::Environment;

/// Placeholder secret, accepted only in development
pub const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// Default bcrypt work factor
pub const DEFAULT_PASSWORD_COST: u32 = 12;

/// JWT signing configuration.
///
/// The secret is held as a [`SecretString`] so that `Debug` output and
/// accidental logging never reveal it.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC key material for signing access tokens
    pub secret: SecretString,

    /// Refresh token expiry time in days
    pub refresh_token_expiry_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::from(DEVELOPMENT_SECRET.to_string()),
            refresh_token_expiry_days: 60,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
            ..Default::default()
        }
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret.expose_secret() == DEVELOPMENT_SECRET
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    /// bcrypt cost parameter
    pub cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            cost: DEFAULT_PASSWORD_COST,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    pub password: PasswordConfig,

    /// Upper bound for a single call into the session stores, in seconds
    pub store_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            password: PasswordConfig::default(),
            store_timeout_secs: default_store_timeout_secs(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// `JWT_SECRET` takes precedence over `TOKEN_SECRET`. Numeric values that
    /// fail to parse fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt = match lookup("JWT_SECRET")
            .or_else(|| lookup("TOKEN_SECRET"))
            .filter(|secret| !secret.is_empty())
        {
            Some(secret) => JwtConfig::new(secret),
            None => JwtConfig::default(),
        };
        let refresh_days = lookup("REFRESH_TOKEN_EXPIRY_DAYS")
            .and_then(|raw| raw.trim().parse().ok())
            .filter(|days: &i64| *days > 0)
            .unwrap_or(jwt.refresh_token_expiry_days);
        let cost = lookup("PASSWORD_HASH_COST")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_PASSWORD_COST);
        let store_timeout_secs = lookup("STORE_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(default_store_timeout_secs());

        Self {
            jwt: jwt.with_refresh_expiry_days(refresh_days),
            password: PasswordConfig { cost },
            store_timeout_secs,
        }
    }

    /// Reject configurations that are unsafe for the given environment
    pub fn validate(&self, environment: Environment) -> Result<(), String> {
        if !environment.is_development() && self.jwt.is_using_default_secret() {
            return Err(format!("JWT_SECRET must be set in the {} environment", environment));
        }
        if !(4..=31).contains(&self.password.cost) {
            return Err(format!(
                "PASSWORD_HASH_COST must be between 4 and 31, got {}",
                self.password.cost
            ));
        }
        Ok(())
    }
}

fn default_store_timeout_secs() -> u64 {
    5
}
