//! Store doubles that fail or stall

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::{RefreshTokenStore, UserDirectory};

fn unavailable() -> DomainError {
    DomainError::StoreUnavailable {
        message: "connection refused".to_string(),
    }
}

/// Token store whose every call fails
pub struct FailingTokenStore;

#[async_trait]
impl RefreshTokenStore for FailingTokenStore {
    async fn save(&self, _token: RefreshToken) -> Result<RefreshToken, DomainError> {
        Err(unavailable())
    }

    async fn lookup(&self, _token: &str) -> Result<Option<RefreshToken>, DomainError> {
        Err(unavailable())
    }

    async fn revoke(&self, _token: &str, _at: DateTime<Utc>) -> Result<bool, DomainError> {
        Err(unavailable())
    }

    async fn reset_all(&self) -> Result<u64, DomainError> {
        Err(DomainError::Internal {
            message: "disk full".to_string(),
        })
    }
}

/// Token store that never answers within any sane timeout
pub struct StalledTokenStore;

#[async_trait]
impl RefreshTokenStore for StalledTokenStore {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        tokio::time::sleep(StdDuration::from_secs(3600)).await;
        Ok(token)
    }

    async fn lookup(&self, _token: &str) -> Result<Option<RefreshToken>, DomainError> {
        tokio::time::sleep(StdDuration::from_secs(3600)).await;
        Ok(None)
    }

    async fn revoke(&self, _token: &str, _at: DateTime<Utc>) -> Result<bool, DomainError> {
        tokio::time::sleep(StdDuration::from_secs(3600)).await;
        Ok(false)
    }

    async fn reset_all(&self) -> Result<u64, DomainError> {
        tokio::time::sleep(StdDuration::from_secs(3600)).await;
        Ok(0)
    }
}

/// User directory whose every call fails
pub struct FailingUserDirectory;

#[async_trait]
impl UserDirectory for FailingUserDirectory {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, DomainError> {
        Err(unavailable())
    }
}
