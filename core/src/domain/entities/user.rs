//! User entity as seen by the session core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user record supplied by a [`UserDirectory`](crate::repositories::UserDirectory).
///
/// The session core only reads users; it never creates or updates them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login email
    pub email: String,

    /// bcrypt hash of the user's password
    #[serde(skip_serializing)]
    pub hashed_password: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Paid membership flag
    #[serde(default)]
    pub is_chirpy_red: bool,
}

impl User {
    /// Creates a new User instance with a fresh id
    pub fn new(email: impl Into<String>, hashed_password: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            hashed_password: hashed_password.into(),
            created_at: now,
            updated_at: now,
            is_chirpy_red: false,
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("hashed_password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("is_chirpy_red", &self.is_chirpy_red)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_hash() {
        let user = User::new("walt@breakingbad.com", "$2b$12$abcdefghijklmnopqrstuv");
        let rendered = format!("{:?}", user);
        assert!(rendered.contains("walt@breakingbad.com"));
        assert!(!rendered.contains("$2b$12$"));
    }

    #[test]
    fn test_serialization_skips_hash() {
        let user = User::new("saul@bettercall.com", "$2b$12$secret");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["email"], "saul@bettercall.com");
        assert_eq!(json["is_chirpy_red"], false);
    }
}
