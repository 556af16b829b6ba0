//! # Chirpy Core
//!
//! Authentication and session lifecycle for the Chirpy backend.
//! This crate contains the token and user entities, the error taxonomy, the
//! store traits with in-memory implementations, and the services that issue,
//! verify, refresh and revoke sessions.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
