//! In-memory refresh token store

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::{RefreshToken, REFRESH_TOKEN_EXPIRY_DAYS};
use crate::errors::DomainError;

use super::r#trait::RefreshTokenStore;

/// Refresh token store backed by a process-local map.
///
/// Used by tests and by the development server when no database is
/// configured. Every operation holds the map lock for its whole duration, so
/// per-token updates are atomic.
#[derive(Clone)]
pub struct InMemoryRefreshTokenStore {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
    ttl: Duration,
}

impl InMemoryRefreshTokenStore {
    /// Create an empty store with the default 60 day token lifetime
    pub fn new() -> Self {
        Self::with_ttl(Duration::days(REFRESH_TOKEN_EXPIRY_DAYS))
    }

    /// Create an empty store issuing tokens that expire after `ttl`
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Number of stored records, including expired and revoked ones
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

impl Default for InMemoryRefreshTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token) {
            return Err(DomainError::Validation {
                message: "Refresh token already exists".to_string(),
            });
        }

        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn lookup(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token).cloned())
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token) {
            Some(record) => {
                record.revoke_at(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn reset_all(&self) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let removed = tokens.len() as u64;
        tokens.clear();
        Ok(removed)
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
