//! Refresh token store trait defining the persistence contract for sessions.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{RefreshToken, REFRESH_TOKEN_EXPIRY_DAYS};
use crate::errors::DomainError;

/// Store for opaque refresh tokens
///
/// Implementations must make each per-token operation atomic: a `lookup`
/// racing a `revoke` observes either the record before the revoke or after
/// it, never a partial write. Failures of the backing store are reported as
/// [`DomainError::StoreUnavailable`] and are not retried here.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Persist a token record
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved record
    /// * `Err(DomainError::Validation)` - A record with the same token string exists
    /// * `Err(DomainError::StoreUnavailable)` - The backing store failed
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its token string
    ///
    /// Expired and revoked records are returned as-is; callers decide validity
    /// with [`RefreshToken::state_at`].
    ///
    /// # Example
    /// ```no_run
    /// # use chirpy_core::repositories::RefreshTokenStore;
    /// # async fn example(store: &impl RefreshTokenStore) -> Result<(), Box<dyn std::error::Error>> {
    /// match store.lookup("9f2c...").await? {
    ///     Some(token) if token.is_valid() => println!("active session for {}", token.user_id),
    ///     Some(_) => println!("session ended"),
    ///     None => println!("unknown token"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn lookup(&self, token: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Mark a token revoked at `at`
    ///
    /// Revocation is write-once: revoking an already revoked token succeeds
    /// but keeps the original `revoked_at`.
    ///
    /// # Returns
    /// * `Ok(true)` - The token exists and is now revoked
    /// * `Ok(false)` - No such token
    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Delete every refresh token, returning how many were removed
    ///
    /// Administrative maintenance only; request paths never call this.
    async fn reset_all(&self) -> Result<u64, DomainError>;

    /// Offset from creation at which new tokens expire
    fn ttl(&self) -> Duration {
        Duration::days(REFRESH_TOKEN_EXPIRY_DAYS)
    }

    /// Issue and persist a new token for `user_id`
    ///
    /// The token string is 32 bytes from the OS CSPRNG, hex-encoded, which
    /// makes collisions practically impossible; the store's uniqueness check
    /// in [`RefreshTokenStore::save`] still rejects one if it happens.
    async fn create(&self, user_id: Uuid) -> Result<RefreshToken, DomainError> {
        self.save(RefreshToken::issue(user_id, self.ttl())).await
    }
}
