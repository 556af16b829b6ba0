//! Business services containing the session lifecycle logic.

pub mod credentials;
pub mod password;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use credentials::{extract_bearer_token, HeaderSource, AUTHORIZATION_HEADER, BEARER_SCHEME};
pub use password::{hash_password, verify_password, PasswordHasher, MIN_COST};
pub use session::{SessionConfig, SessionManager};
pub use token::{make_access_token, validate_access_token, AccessTokenCodec};
