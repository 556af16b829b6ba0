//! Session manager implementation

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::token::{
    access_token_lifetime, token_log_prefix, RefreshTokenState, ACCESS_TOKEN_LIFETIME_SECS,
};
use crate::domain::entities::user::User;
use crate::domain::value_objects::{AccessGrant, Session};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RefreshTokenStore, UserDirectory};
use crate::services::credentials::{extract_bearer_token, HeaderSource};
use crate::services::password::PasswordHasher;
use crate::services::token::AccessTokenCodec;

use super::config::SessionConfig;

/// Orchestrates login, refresh, revocation and request authentication
///
/// The manager holds no mutable state of its own. The codec keys are fixed at
/// construction and every write goes through the refresh token store.
pub struct SessionManager<U, T>
where
    U: UserDirectory,
    T: RefreshTokenStore,
{
    /// Read-only user lookups
    users: Arc<U>,
    /// Refresh token persistence
    tokens: Arc<T>,
    /// Access token signing and verification
    codec: AccessTokenCodec,
    hasher: PasswordHasher,
    config: SessionConfig,
}

impl<U, T> SessionManager<U, T>
where
    U: UserDirectory,
    T: RefreshTokenStore,
{
    /// Create a new session manager
    ///
    /// # Arguments
    ///
    /// * `users` - Directory used to resolve login emails and token owners
    /// * `tokens` - Store for refresh tokens
    /// * `codec` - Codec built from the process-wide signing secret
    /// * `config` - Timeouts and hashing cost
    pub fn new(
        users: Arc<U>,
        tokens: Arc<T>,
        codec: AccessTokenCodec,
        config: SessionConfig,
    ) -> Self {
        Self {
            users,
            tokens,
            codec,
            hasher: PasswordHasher::new(config.password_cost),
            config,
        }
    }

    /// Log a user in with email and password
    ///
    /// # Process
    /// 1. Look the user up by email
    /// 2. Verify the password against the stored hash
    /// 3. Mint a one hour access token
    /// 4. Create and persist a refresh token
    ///
    /// An unknown email and a wrong password produce the same
    /// [`AuthError::AuthFailed`].
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Session> {
        let user = match self
            .call_store("find_by_email", self.users.find_by_email(email))
            .await?
        {
            Some(user) => user,
            None => {
                tracing::info!("Login rejected: no user for email");
                return Err(AuthError::AuthFailed.into());
            }
        };

        self.check_password(&user, password).await?;

        let access_token = self.codec.create(user.id, access_token_lifetime())?;
        let refresh = self
            .call_store("create_refresh_token", self.tokens.create(user.id))
            .await?;

        tracing::info!(
            user_id = %user.id,
            refresh_token = refresh.log_prefix(),
            "Session issued"
        );

        Ok(Session {
            user,
            access_token,
            access_expires_in: ACCESS_TOKEN_LIFETIME_SECS,
            refresh_token: refresh.token,
            refresh_expires_at: refresh.expires_at,
        })
    }

    /// Exchange a refresh token for a new access token
    ///
    /// The refresh token itself is left unchanged. Unknown, expired and
    /// revoked tokens, and tokens whose owner no longer exists, all yield
    /// [`AuthError::InvalidSession`].
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AccessGrant> {
        let prefix = token_log_prefix(refresh_token);
        let record = match self
            .call_store("lookup_refresh_token", self.tokens.lookup(refresh_token))
            .await?
        {
            Some(record) => record,
            None => {
                tracing::info!(refresh_token = prefix, "Refresh rejected: unknown token");
                return Err(AuthError::InvalidSession.into());
            }
        };

        let state = record.state_at(Utc::now());
        if state != RefreshTokenState::Active {
            tracing::info!(
                refresh_token = prefix,
                user_id = %record.user_id,
                state = ?state,
                "Refresh rejected"
            );
            return Err(AuthError::InvalidSession.into());
        }

        if self
            .call_store("find_by_id", self.users.find_by_id(record.user_id))
            .await?
            .is_none()
        {
            tracing::warn!(
                refresh_token = prefix,
                user_id = %record.user_id,
                "Refresh rejected: owner no longer exists"
            );
            return Err(AuthError::InvalidSession.into());
        }

        let access_token = self.codec.create(record.user_id, access_token_lifetime())?;
        tracing::debug!(user_id = %record.user_id, "Access token refreshed");

        Ok(AccessGrant {
            access_token,
            expires_in: ACCESS_TOKEN_LIFETIME_SECS,
        })
    }

    /// Revoke a refresh token
    ///
    /// Revoking an already revoked token succeeds and keeps the first
    /// revocation time. Unknown tokens yield [`AuthError::InvalidSession`].
    pub async fn revoke_session(&self, refresh_token: &str) -> DomainResult<()> {
        let prefix = token_log_prefix(refresh_token);
        let found = self
            .call_store(
                "revoke_refresh_token",
                self.tokens.revoke(refresh_token, Utc::now()),
            )
            .await?;

        if !found {
            tracing::info!(refresh_token = prefix, "Revoke rejected: unknown token");
            return Err(AuthError::InvalidSession.into());
        }

        tracing::info!(refresh_token = prefix, "Session revoked");
        Ok(())
    }

    /// Resolve the user behind a request's bearer access token
    ///
    /// Every failure is logged with its cause and returned as
    /// [`AuthError::Unauthorized`].
    pub fn authenticate<H: HeaderSource + ?Sized>(&self, headers: &H) -> DomainResult<Uuid> {
        extract_bearer_token(headers)
            .map_err(DomainError::from)
            .and_then(|token| self.codec.verify(&token))
            .map_err(|e| {
                tracing::warn!(reason = %e, "Request authentication failed");
                DomainError::from(AuthError::Unauthorized)
            })
    }

    /// Verify a raw access token, keeping the detailed failure
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Uuid> {
        self.codec.verify(token)
    }

    /// Delete every refresh token; maintenance only
    pub async fn reset_all(&self) -> DomainResult<u64> {
        let removed = self
            .call_store("reset_refresh_tokens", self.tokens.reset_all())
            .await?;
        tracing::warn!(removed, "All refresh tokens deleted");
        Ok(removed)
    }

    /// Hash a password with the configured cost, off the async scheduler
    pub async fn hash_password(&self, plaintext: &str) -> DomainResult<String> {
        let hasher = self.hasher;
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("password hashing task failed: {}", e),
            })?
    }

    async fn check_password(&self, user: &User, password: &str) -> DomainResult<()> {
        let hasher = self.hasher;
        let hashed = user.hashed_password.clone();
        let plaintext = password.to_owned();

        let outcome = tokio::task::spawn_blocking(move || hasher.verify(&hashed, &plaintext))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("password verification task failed: {}", e),
            })?;

        match outcome {
            Ok(()) => Ok(()),
            Err(DomainError::Auth(AuthError::PasswordMismatch)) => {
                tracing::info!(user_id = %user.id, "Login rejected: password mismatch");
                Err(AuthError::AuthFailed.into())
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash unusable");
                Err(AuthError::AuthFailed.into())
            }
        }
    }

    /// Run one store call under the configured timeout
    ///
    /// Store errors and timeouts both surface as
    /// [`DomainError::StoreUnavailable`]; nothing is retried.
    async fn call_store<F, R>(&self, operation: &'static str, call: F) -> DomainResult<R>
    where
        F: Future<Output = DomainResult<R>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!(operation, error = %e, "Session store call failed");
                Err(match e {
                    DomainError::StoreUnavailable { .. } => e,
                    other => DomainError::StoreUnavailable {
                        message: format!("{}: {}", operation, other),
                    },
                })
            }
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "Session store call timed out"
                );
                Err(DomainError::StoreUnavailable {
                    message: format!(
                        "{} timed out after {:?}",
                        operation, self.config.store_timeout
                    ),
                })
            }
        }
    }
}
