//! HS256 access token signing and validation.
//!
//! Implements the `TokenSigner` trait from `chatdesk-core` using the
//! `jsonwebtoken` crate. Tokens carry `sub` (username), `exp`, and `iat`
//! claims; validation runs with zero leeway so expiry is exact.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};

use chatdesk_core::service::token::TokenSigner;
use chatdesk_types::auth::TokenClaims;
use chatdesk_types::config::AuthConfig;
use chatdesk_types::error::AuthError;

/// HMAC-SHA256 implementation of `TokenSigner`.
pub struct JwtTokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
}

impl JwtTokenSigner {
    /// Create a signer from a raw key and token lifetime.
    pub fn new(secret_key: &SecretString, ttl_minutes: i64) -> Self {
        let secret = secret_key.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_minutes,
        }
    }

    /// Create a signer from the auth section of the app config.
    pub fn from_config(auth: &AuthConfig) -> Self {
        Self::new(&auth.secret_key, auth.access_token_ttl_minutes)
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation
    }
}

impl TokenSigner for JwtTokenSigner {
    fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: subject.to_string(),
            exp: (now + Duration::minutes(self.ttl_minutes)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(format!("signing failed: {e}")))
    }

    fn verify(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &Self::validation()).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(err.to_string()),
            },
        )?;

        Ok(data.claims.sub)
    }
}
