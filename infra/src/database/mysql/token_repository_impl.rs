//! MySQL implementation of the RefreshTokenStore trait.
//!
//! Tokens are stored as issued; every per-token write is a single-row
//! statement so MySQL's row locking gives the atomicity the session core
//! relies on.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use chirpy_core::domain::entities::token::{
    token_log_prefix, RefreshToken, REFRESH_TOKEN_EXPIRY_DAYS,
};
use chirpy_core::errors::DomainError;
use chirpy_core::repositories::RefreshTokenStore;

use super::{column_error, store_error};

/// MySQL implementation of RefreshTokenStore
pub struct MySqlRefreshTokenStore {
    /// Database connection pool
    pool: MySqlPool,
    /// Lifetime applied to newly created tokens
    ttl: Duration,
}

impl MySqlRefreshTokenStore {
    /// Create a new store issuing tokens with the default 60 day lifetime
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            ttl: Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        }
    }

    /// Override the lifetime of newly created tokens
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| column_error("user_id", e))?;

        Ok(RefreshToken {
            token: row.try_get("token").map_err(|e| column_error("token", e))?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| column_error("user_id", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(|e| column_error("revoked_at", e))?,
        })
    }

    async fn exists(&self, token: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS found FROM refresh_tokens WHERE token = ?")
            .bind(token)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to check refresh token", e))?;

        let found: i64 = row.try_get("found").map_err(|e| column_error("found", e))?;
        Ok(found > 0)
    }
}

#[async_trait]
impl RefreshTokenStore for MySqlRefreshTokenStore {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                token, user_id, created_at, updated_at, expires_at, revoked_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&token.token)
            .bind(token.user_id.to_string())
            .bind(token.created_at)
            .bind(token.updated_at)
            .bind(token.expires_at)
            .bind(token.revoked_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(token),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(DomainError::Validation {
                    message: "Refresh token already exists".to_string(),
                })
            }
            Err(e) => Err(store_error("Failed to save refresh token", e)),
        }
    }

    async fn lookup(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT token, user_id, created_at, updated_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to look up refresh token", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?, updated_at = ?
            WHERE token = ? AND revoked_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(at)
            .bind(at)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to revoke refresh token", e))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Nothing changed: either unknown or already revoked.
        let found = self.exists(token).await?;
        if found {
            tracing::debug!(
                refresh_token = token_log_prefix(token),
                "Refresh token was already revoked"
            );
        }
        Ok(found)
    }

    async fn reset_all(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens")
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete refresh tokens", e))?;

        Ok(result.rows_affected())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
