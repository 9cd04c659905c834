//! Configuration types for Chatdesk.
//!
//! `AppConfig` represents the top-level `config.toml`. All fields have
//! defaults, so an empty or missing file yields a working dev setup.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Placeholder signing key shipped for local development. Serving with this
/// key still works but logs a warning.
pub const DEV_SECRET_KEY: &str = "CHANGE_THIS_TO_A_SECURE_SECRET_KEY";

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
///
/// Deliberately not `Serialize`: the auth section holds the signing key.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
        }
    }
}

/// Token issuing/validation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC key for signing access tokens.
    #[serde(default = "default_secret_key")]
    pub secret_key: SecretString,

    /// Access token lifetime in minutes.
    #[serde(default = "default_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
}

fn default_secret_key() -> SecretString {
    SecretString::from(DEV_SECRET_KEY)
}

fn default_token_ttl_minutes() -> i64 {
    30
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            access_token_ttl_minutes: default_token_ttl_minutes(),
        }
    }
}

impl AuthConfig {
    /// True while the placeholder dev key is in use.
    pub fn uses_dev_key(&self) -> bool {
        self.secret_key.expose_secret() == DEV_SECRET_KEY
    }
}
