//! Value objects representing immutable domain concepts.

pub mod session;

pub use session::{AccessGrant, Session};
