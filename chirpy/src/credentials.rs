//! One-way password hashing.
//!
//! Hashes are bcrypt with a fixed cost chosen at startup. `DEFAULT_COST`
//! (12) is used unless `BCRYPT_COST` overrides it; tests drop to the
//! minimum cost of 4 to stay fast.

use crate::errors::Error;
use bcrypt::{DEFAULT_COST, hash, verify};

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, Error> {
        Ok(hash(plaintext, self.cost)?)
    }

    /// Returns `Ok(false)` for a wrong password. Only a hash that bcrypt
    /// cannot parse is an error.
    pub fn verify(&self, hashed: &str, plaintext: &str) -> Result<bool, Error> {
        Ok(verify(plaintext, hashed)?)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}
