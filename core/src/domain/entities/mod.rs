//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    access_token_lifetime, generate_token_string, token_log_prefix, Claims, RefreshToken,
    RefreshTokenState, ACCESS_TOKEN_ISSUER, ACCESS_TOKEN_LIFETIME_SECS, REFRESH_TOKEN_BYTES,
    REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::User;
