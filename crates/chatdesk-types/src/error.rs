use thiserror::Error;

/// Errors from password hashing and token handling.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    Expired,

    #[error("hash error: {0}")]
    Hash(String),
}

/// Errors from account operations (registration, login, token auth).
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("incorrect username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] AuthError),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from chat session and message operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("session not found")]
    SessionNotFound,

    #[error("not authorized to access this session")]
    NotOwner,

    #[error("message cannot be empty")]
    EmptyMessage,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from repository operations (used by trait definitions in chatdesk-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
