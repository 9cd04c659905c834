//! Credential service combining password hashing and token signing.

use chatdesk_types::error::AuthError;

use crate::service::hasher::PasswordHasher;
use crate::service::token::TokenSigner;

/// Bundles the two credential concerns behind one seam.
///
/// Generic over `PasswordHasher` and `TokenSigner` so the core stays free of
/// algorithm choices; the argon2 and JWT adapters live in chatdesk-infra.
pub struct CredentialService<H: PasswordHasher, S: TokenSigner> {
    hasher: H,
    signer: S,
}

impl<H: PasswordHasher, S: TokenSigner> CredentialService<H, S> {
    pub fn new(hasher: H, signer: S) -> Self {
        Self { hasher, signer }
    }

    /// Hash a plaintext password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        self.hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
        self.hasher.verify(password, password_hash)
    }

    /// Issue a signed access token for a subject.
    pub fn issue_token(&self, subject: &str) -> Result<String, AuthError> {
        self.signer.issue(subject)
    }

    /// Validate a token and return its subject.
    pub fn validate_token(&self, token: &str) -> Result<String, AuthError> {
        self.signer.verify(token)
    }
}
