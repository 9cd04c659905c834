//! TokenSigner trait for access token issuing and validation.
//!
//! Defined in chatdesk-core so services can mint and check bearer tokens
//! without coupling to a signing scheme. The `JwtTokenSigner` adapter lives
//! in chatdesk-infra.

use chatdesk_types::error::AuthError;

/// Abstraction over signed access tokens.
pub trait TokenSigner: Send + Sync {
    /// Issue a token bound to `subject` (the username), expiring after the
    /// configured lifetime.
    fn issue(&self, subject: &str) -> Result<String, AuthError>;

    /// Validate a token and return its subject.
    ///
    /// Fails with `Expired` for stale tokens and `InvalidToken` for anything
    /// garbled, forged, or missing its subject.
    fn verify(&self, token: &str) -> Result<String, AuthError>;
}
