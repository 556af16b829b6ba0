//! Read-only user lookups consumed by the session core.
//!
//! User records are owned by the user-management side of the application.
//! The session core only needs to resolve a login email and to confirm that
//! the owner of a refresh token still exists.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Directory of registered users
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use chirpy_core::repositories::UserDirectory;
/// use chirpy_core::domain::entities::user::User;
/// use chirpy_core::errors::DomainError;
///
/// struct LdapDirectory;
///
/// #[async_trait]
/// impl UserDirectory for LdapDirectory {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by login email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - The directory could not be queried
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
}
