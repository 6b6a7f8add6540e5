//! Password hashing using Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Argon2id hash with the default cost parameters and an all-zero digest.
///
/// Parses as a valid PHC string, so verifying against it costs a full Argon2
/// run, and no password produces it.
pub const DECOY_ARGON2_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// One-way password hashing and verification
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password into a self-describing string
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> bool;

    /// Stored-hash stand-in for logins whose identifier matches no account
    fn decoy_hash(&self) -> &str;

    /// Spend the same work as a real verification, always failing
    fn verify_decoy(&self, password: &str) -> bool {
        self.verify(password, self.decoy_hash());
        false
    }
}

/// Argon2id hasher with a random salt per hash
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    // Argon2's verifier compares digests in constant time.
    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    fn decoy_hash(&self) -> &str {
        DECOY_ARGON2_HASH
    }
}
