//! Authentication HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/auth/register - Create an account
//! - POST /api/v1/auth/login    - Exchange credentials for a bearer token

use axum::extract::State;
use axum::{Form, Json};
use serde::Deserialize;

use chatdesk_types::auth::AccessToken;
use chatdesk_types::user::{RegisterRequest, UserProfile};

use crate::http::error::ApiError;
use crate::state::AppState;

/// Form body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/auth/register - Create an account.
///
/// Returns the public profile; the password hash never leaves the server.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    if request.username.trim().is_empty() {
        return Err(ApiError::Validation(
            "Username must not be empty".to_string(),
        ));
    }
    if request.password.is_empty() {
        return Err(ApiError::Validation(
            "Password must not be empty".to_string(),
        ));
    }

    let user = state.account.register(request).await?;
    Ok(Json(user.profile()))
}

/// POST /api/v1/auth/login - Exchange credentials for a bearer token.
///
/// Takes a form-encoded body, matching what OAuth2 password-flow clients send.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AccessToken>, ApiError> {
    let token = state.account.login(&form.username, &form.password).await?;
    Ok(Json(token))
}
