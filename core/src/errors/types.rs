//! Error types for credential, token and session failures
//!
//! The HTTP layer collapses most of these into a single 401. The variants stay
//! distinct here so operators can see the real cause in the logs.

use thiserror::Error;

/// Authentication and session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingCredential,

    #[error("Authorization header is not of the form 'Bearer <token>'")]
    MalformedCredential,

    #[error("Password does not match")]
    PasswordMismatch,

    /// Login failure; never says whether the email or the password was wrong
    #[error("Incorrect email or password")]
    AuthFailed,

    /// Refresh token unknown, expired, revoked or orphaned
    #[error("Invalid session")]
    InvalidSession,

    #[error("Unauthorized")]
    Unauthorized,
}

/// Access token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is invalid or expired")]
    InvalidOrExpiredToken,

    #[error("Token was not issued by this service")]
    InvalidIssuer,

    #[error("Token subject is not a valid user id")]
    MalformedSubject,

    #[error("Failed to generate token")]
    TokenGenerationFailed,
}
