//! Token entities for session management.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer tag embedded in, and required of, every access token
pub const ACCESS_TOKEN_ISSUER: &str = "chirpy-access";

/// Access token lifetime (1 hour)
pub const ACCESS_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Refresh token expiration time (60 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 60;

/// Number of random bytes behind a refresh token string
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Lifetime applied to every access token minted at login or refresh
pub fn access_token_lifetime() -> Duration {
    Duration::seconds(ACCESS_TOKEN_LIFETIME_SECS)
}

/// Claims structure for the access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    #[serde(default)]
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Subject (user ID)
    #[serde(default)]
    pub sub: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `lifetime` - How long the token stays valid from now
    ///
    /// # Returns
    ///
    /// A new `Claims` instance issued by [`ACCESS_TOKEN_ISSUER`]
    pub fn new_access_token(user_id: Uuid, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            sub: user_id.to_string(),
        }
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Lifecycle state of a refresh token.
///
/// `Expired` is derived from the clock and never stored. `Revoked` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshTokenState {
    Active,
    Expired,
    Revoked,
}

/// Refresh token record persisted by a [`RefreshTokenStore`](crate::repositories::RefreshTokenStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Opaque token string, 64 lowercase hex characters
    pub token: String,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last write to the record
    pub updated_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Set once when the token is revoked
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Issues a fresh refresh token for a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - The owning user's UUID
    /// * `ttl` - Offset from now at which the token expires
    ///
    /// # Returns
    ///
    /// A new, active `RefreshToken` backed by OS randomness
    pub fn issue(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            token: generate_token_string(),
            user_id,
            created_at: now,
            updated_at: now,
            expires_at: now + ttl,
            revoked_at: None,
        }
    }

    /// Computes the lifecycle state at `now`
    pub fn state_at(&self, now: DateTime<Utc>) -> RefreshTokenState {
        if self.revoked_at.is_some() {
            RefreshTokenState::Revoked
        } else if now >= self.expires_at {
            RefreshTokenState::Expired
        } else {
            RefreshTokenState::Active
        }
    }

    /// Computes the lifecycle state against the current clock
    pub fn state(&self) -> RefreshTokenState {
        self.state_at(Utc::now())
    }

    /// Checks if the refresh token is valid
    ///
    /// A token is valid if it hasn't expired and hasn't been revoked
    pub fn is_valid(&self) -> bool {
        self.state() == RefreshTokenState::Active
    }

    /// Marks the token revoked at `now`.
    ///
    /// Returns `false` and leaves the record untouched if it was already
    /// revoked.
    pub fn revoke_at(&mut self, now: DateTime<Utc>) -> bool {
        if self.revoked_at.is_some() {
            return false;
        }
        self.revoked_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Short prefix of the token string that is safe to log
    pub fn log_prefix(&self) -> &str {
        token_log_prefix(&self.token)
    }
}

/// Draws [`REFRESH_TOKEN_BYTES`] from the OS CSPRNG and hex-encodes them
pub fn generate_token_string() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// First eight characters of a token, for log lines
pub fn token_log_prefix(token: &str) -> &str {
    match token.char_indices().nth(8) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, access_token_lifetime());

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.iss, ACCESS_TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_LIFETIME_SECS);
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_refresh_token_shape() {
        let token = RefreshToken::issue(Uuid::new_v4(), Duration::days(REFRESH_TOKEN_EXPIRY_DAYS));

        assert_eq!(token.token.len(), REFRESH_TOKEN_BYTES * 2);
        assert!(token
            .token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(token.expires_at - token.created_at, Duration::days(60));
        assert_eq!(token.state(), RefreshTokenState::Active);
    }

    #[test]
    fn test_issued_tokens_differ() {
        let user_id = Uuid::new_v4();
        let a = RefreshToken::issue(user_id, Duration::days(1));
        let b = RefreshToken::issue(user_id, Duration::days(1));
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_refresh_token_expiration_is_computed() {
        let token = RefreshToken::issue(Uuid::new_v4(), Duration::days(1));

        assert_eq!(token.state_at(token.expires_at - Duration::seconds(1)), RefreshTokenState::Active);
        assert_eq!(token.state_at(token.expires_at), RefreshTokenState::Expired);
        assert!(token.revoked_at.is_none());
    }

    #[test]
    fn test_revocation_is_write_once() {
        let mut token = RefreshToken::issue(Uuid::new_v4(), Duration::days(1));
        let first = Utc::now();

        assert!(token.revoke_at(first));
        assert!(!token.revoke_at(first + Duration::minutes(5)));
        assert_eq!(token.revoked_at, Some(first));
        assert!(!token.is_valid());
    }

    #[test]
    fn test_revoked_wins_over_expired() {
        let mut token = RefreshToken::issue(Uuid::new_v4(), Duration::days(1));
        token.revoke_at(Utc::now());
        let later = token.expires_at + Duration::days(1);
        assert_eq!(token.state_at(later), RefreshTokenState::Revoked);
    }

    #[test]
    fn test_log_prefix_is_short() {
        let token = RefreshToken::issue(Uuid::new_v4(), Duration::days(1));
        assert_eq!(token.log_prefix().len(), 8);
        assert_eq!(token_log_prefix("abc"), "abc");
    }
}
