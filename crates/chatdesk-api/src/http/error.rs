//! Application error type mapping domain errors to HTTP status codes.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatdesk_types::error::{AccountError, AuthError, ChatError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Account and credential errors.
    Account(AccountError),
    /// Chat session errors.
    Chat(ChatError),
    /// Authentication failure before the account service is reached
    /// (missing or malformed Authorization header).
    Unauthorized(String),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        ApiError::Account(e)
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        ApiError::Chat(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Account(AccountError::UsernameTaken(username)) => (
                StatusCode::BAD_REQUEST,
                "USERNAME_TAKEN",
                format!("Username '{username}' is already taken"),
            ),
            ApiError::Account(AccountError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Incorrect username or password".to_string(),
            ),
            ApiError::Account(AccountError::Token(AuthError::Expired)) => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                "Access token has expired".to_string(),
            ),
            ApiError::Account(AccountError::Token(AuthError::InvalidToken(_))) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Could not validate credentials".to_string(),
            ),
            ApiError::Account(AccountError::Token(AuthError::Hash(msg))) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
            ApiError::Account(AccountError::Storage(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                msg.clone(),
            ),
            ApiError::Chat(ChatError::SessionNotFound) => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Session not found".to_string(),
            ),
            ApiError::Chat(ChatError::NotOwner) => (
                StatusCode::FORBIDDEN,
                "NOT_SESSION_OWNER",
                "Not authorized to access this session".to_string(),
            ),
            ApiError::Chat(ChatError::EmptyMessage) => (
                StatusCode::BAD_REQUEST,
                "EMPTY_MESSAGE",
                "Message cannot be empty".to_string(),
            ),
            ApiError::Chat(ChatError::Storage(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                msg.clone(),
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        let mut response = (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response();

        // 401 responses carry a bearer challenge.
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
