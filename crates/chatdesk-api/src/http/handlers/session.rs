//! Chat session HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/chat/sessions      - Open a new session
//! - GET  /api/v1/chat/sessions      - List the caller's sessions
//! - GET  /api/v1/chat/sessions/{id} - Session with its full transcript

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use chatdesk_types::chat::{ChatSession, SessionHistory};

use crate::http::error::ApiError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, ApiError> {
    s.parse::<Uuid>()
        .map_err(|_| ApiError::Validation(format!("Invalid session id: {s}")))
}

/// POST /api/v1/chat/sessions - Open a new session for the caller.
pub async fn create_session(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ChatSession>, ApiError> {
    let session = state.chat.create_session(user.id).await?;
    Ok(Json(session))
}

/// GET /api/v1/chat/sessions - List the caller's sessions, oldest first.
pub async fn list_sessions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ChatSession>>, ApiError> {
    let sessions = state.chat.list_sessions(&user.id).await?;
    Ok(Json(sessions))
}

/// GET /api/v1/chat/sessions/{id} - Session with its transcript, owner only.
pub async fn get_history(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(session_id): Path<String>,
) -> Result<Json<SessionHistory>, ApiError> {
    let sid = parse_uuid(&session_id)?;
    let history = state.chat.get_history(&sid, &user.id).await?;
    Ok(Json(history))
}
