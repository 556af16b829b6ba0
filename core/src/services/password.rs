//! Password hashing with bcrypt
//!
//! Hashes are salted, so two hashes of the same password differ. Compare
//! through [`PasswordHasher::verify`], never by string equality.

use crate::errors::{AuthError, DomainError, DomainResult};

/// Default bcrypt work factor
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Lowest work factor bcrypt accepts
pub const MIN_COST: u32 = 4;

/// bcrypt hasher with a fixed cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes `plaintext` with a fresh random salt
    pub fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("password hashing failed: {}", e),
        })
    }

    /// Checks `plaintext` against a stored hash
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The password matches
    /// * `Err(AuthError::PasswordMismatch)` - It does not
    /// * `Err(DomainError::Internal)` - The stored hash is not a bcrypt hash
    pub fn verify(&self, hashed: &str, plaintext: &str) -> DomainResult<()> {
        match bcrypt::verify(plaintext, hashed) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AuthError::PasswordMismatch.into()),
            // The bcrypt error text embeds the hash itself.
            Err(_) => Err(DomainError::Internal {
                message: "stored password hash is not a valid bcrypt hash".to_string(),
            }),
        }
    }
}

/// Hashes with [`DEFAULT_COST`]
pub fn hash_password(plaintext: &str) -> DomainResult<String> {
    PasswordHasher::default().hash(plaintext)
}

/// Verifies against a stored hash of any cost
pub fn verify_password(hashed: &str, plaintext: &str) -> DomainResult<()> {
    PasswordHasher::default().verify(hashed, plaintext)
}
