//! Session lifecycle
//!
//! This module ties the credential extractor, password hasher, access token
//! codec and refresh token store together:
//! - Login with email and password
//! - Exchanging a refresh token for a new access token
//! - Revoking a refresh token
//! - Resolving the user behind an incoming request

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::SessionConfig;
pub use service::SessionManager;
