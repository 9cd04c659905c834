//! Bearer token authentication extractor.
//!
//! Extracts the access token from the `Authorization: Bearer <token>` header
//! and resolves it to the account it belongs to. Handlers take a
//! [`CurrentUser`] argument to require authentication.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use chatdesk_types::user::User;

use crate::http::error::ApiError;
use crate::state::AppState;

/// The authenticated caller. Extracting this validates the bearer token.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.account.authenticate(token).await?;
        Ok(CurrentUser(user))
    }
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth = parts.headers.get("authorization").ok_or_else(|| {
        ApiError::Unauthorized(
            "Missing access token. Provide it via 'Authorization: Bearer <token>' header."
                .to_string(),
        )
    })?;

    let auth_str = auth.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header encoding".to_string())
    })?;

    auth_str.strip_prefix("Bearer ").map(str::trim).ok_or_else(|| {
        ApiError::Unauthorized("Malformed Authorization header. Expected 'Bearer <token>'.".to_string())
    })
}
