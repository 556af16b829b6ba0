//! Session outcomes handed back to the HTTP layer.

use chrono::{DateTime, Utc};

use crate::domain::entities::User;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct Session {
    /// The authenticated user
    pub user: User,

    /// Signed access token
    pub access_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Opaque refresh token string
    pub refresh_token: String,

    /// When the refresh token stops being accepted
    pub refresh_expires_at: DateTime<Utc>,
}

/// Result of exchanging a refresh token for a new access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    /// Signed access token
    pub access_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}
