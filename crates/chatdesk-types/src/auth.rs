//! Authentication wire types.

use serde::{Deserialize, Serialize};

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            access_token: token.into(),
            token_type: "bearer".to_string(),
        }
    }
}

/// Claims carried inside a signed access token.
///
/// `sub` is the username, `exp`/`iat` are unix timestamps in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}
