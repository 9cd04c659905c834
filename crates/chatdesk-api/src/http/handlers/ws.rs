//! WebSocket handler for the real-time chat channel.
//!
//! `GET /api/v1/chat/ws/{session_id}` upgrades an HTTP connection to a
//! WebSocket. The access token travels as a `?token=` query parameter
//! because browser WebSocket clients cannot set the Authorization header.
//!
//! After authenticating the caller and binding the session (both checked
//! once, before the first frame), the handler runs a strict request/reply
//! loop: each text frame is parsed as `{"content": "..."}`, the message and
//! its generated reply are persisted, and the reply is pushed back as a JSON
//! text frame. Failures before the loop close the socket with 1008 (policy
//! violation); an empty message gets a soft error frame and the connection
//! stays open.

use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chatdesk_types::error::ChatError;

use crate::state::AppState;

/// Query parameters for the WebSocket route.
#[derive(Debug, Deserialize)]
pub struct WsAuthQuery {
    /// Access token issued by `POST /api/v1/auth/login`.
    #[serde(default)]
    pub token: Option<String>,
}

/// Incoming chat frame from the client.
#[derive(Debug, Deserialize)]
struct Inbound {
    #[serde(default)]
    content: Option<String>,
}

/// Outgoing reply frame.
#[derive(Debug, Serialize)]
struct Outbound<'a> {
    role: &'static str,
    content: &'a str,
    timestamp: String,
}

/// Upgrade `GET /api/v1/chat/ws/{session_id}` to a WebSocket chat channel.
pub async fn chat_ws(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<WsAuthQuery>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_chat_socket(socket, state, session_id, query.token))
}

/// Core WebSocket connection handler.
async fn handle_chat_socket(
    mut socket: WebSocket,
    state: AppState,
    session_id: String,
    token: Option<String>,
) {
    // Authenticate before anything else.
    let Some(token) = token else {
        close_policy(&mut socket, "Missing access token").await;
        return;
    };

    let user = match state.account.authenticate(&token).await {
        Ok(user) => user,
        Err(err) => {
            tracing::debug!(error = %err, "WebSocket authentication failed");
            close_policy(&mut socket, "Invalid or expired access token").await;
            return;
        }
    };

    // Bind the session once; ownership cannot change mid-connection.
    let Ok(session_id) = session_id.parse::<Uuid>() else {
        close_policy(&mut socket, "Session not found").await;
        return;
    };

    let session = match state.chat.resolve_owned(&session_id, &user.id).await {
        Ok(session) => session,
        Err(ChatError::SessionNotFound) => {
            close_policy(&mut socket, "Session not found").await;
            return;
        }
        Err(ChatError::NotOwner) => {
            close_policy(&mut socket, "Not authorized to access this session").await;
            return;
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to resolve session for WebSocket");
            close_error(&mut socket).await;
            return;
        }
    };

    tracing::debug!(session_id = %session.id, user_id = %user.id, "Chat channel open");

    loop {
        let message = match socket.recv().await {
            Some(Ok(message)) => message,
            Some(Err(err)) => {
                tracing::debug!("WebSocket receive error: {err}");
                break;
            }
            None => break,
        };

        match message {
            Message::Text(text) => {
                let inbound: Inbound = match serde_json::from_str(&text) {
                    Ok(inbound) => inbound,
                    Err(err) => {
                        tracing::warn!(error = %err, "Closing chat channel on malformed frame");
                        break;
                    }
                };

                let content = inbound.content.unwrap_or_default();
                if content.trim().is_empty() {
                    if send_empty_message_error(&mut socket).await.is_err() {
                        break;
                    }
                    continue;
                }

                match state.chat.record_exchange(session.id, &content).await {
                    Ok(exchange) => {
                        let frame = Outbound {
                            role: "bot",
                            content: &exchange.reply.content,
                            timestamp: exchange.reply.created_at.to_rfc3339(),
                        };
                        if send_json(&mut socket, &frame).await.is_err() {
                            break;
                        }
                    }
                    Err(ChatError::EmptyMessage) => {
                        if send_empty_message_error(&mut socket).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::error!(
                            error = %err,
                            session_id = %session.id,
                            "Failed to record exchange"
                        );
                        close_error(&mut socket).await;
                        return;
                    }
                }
            }
            Message::Close(_) => break,
            // Binary, ping and pong frames are not part of the chat protocol.
            _ => {}
        }
    }

    tracing::debug!(session_id = %session.id, "Chat channel closed");
}

/// Send a JSON-encoded text frame.
async fn send_json<T: Serialize>(socket: &mut WebSocket, payload: &T) -> Result<(), axum::Error> {
    let json = serde_json::to_string(payload).map_err(axum::Error::new)?;
    socket.send(Message::Text(json.into())).await
}

/// Soft error frame for blank messages; the connection stays open.
async fn send_empty_message_error(socket: &mut WebSocket) -> Result<(), axum::Error> {
    send_json(socket, &serde_json::json!({"error": "Message cannot be empty"})).await
}

/// Close with 1008 (policy violation) and the given reason.
async fn close_policy(socket: &mut WebSocket, reason: &'static str) {
    let frame = CloseFrame {
        code: close_code::POLICY,
        reason: reason.into(),
    };
    if let Err(err) = socket.send(Message::Close(Some(frame))).await {
        tracing::debug!("Failed to send policy close: {err}");
    }
}

/// Close with 1011 after an internal failure.
async fn close_error(socket: &mut WebSocket) {
    let frame = CloseFrame {
        code: close_code::ERROR,
        reason: "Internal error".into(),
    };
    if let Err(err) = socket.send(Message::Close(Some(frame))).await {
        tracing::debug!("Failed to send error close: {err}");
    }
}
