//! Access token codec
//!
//! Creates and verifies the short-lived HS256 tokens that carry a user id.
//! Verification is pure computation over the token, the secret and the clock;
//! it never touches a store.

mod codec;

#[cfg(test)]
mod tests;

pub use codec::{make_access_token, validate_access_token, AccessTokenCodec};
