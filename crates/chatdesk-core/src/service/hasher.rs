//! PasswordHasher trait for credential hashing.
//!
//! Defined in chatdesk-core so services can hash and check passwords without
//! coupling to a specific algorithm. The `Argon2PasswordHasher` adapter lives
//! in chatdesk-infra.

use chatdesk_types::error::AuthError;

/// Abstraction over password hashing.
///
/// `hash` produces a self-describing PHC string (salt included), so `verify`
/// needs no extra parameters.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// A wrong password is `Ok(false)`; `Err` means the stored hash itself
    /// could not be processed.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError>;
}
