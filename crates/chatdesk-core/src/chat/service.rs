//! Chat service orchestrating session lifecycle and message exchange.
//!
//! ChatService coordinates the ChatRepository and the reply generator:
//! creating sessions, enforcing ownership on reads, and persisting the
//! user/bot message pair for each exchange.

use chatdesk_types::chat::{ChatSession, Message, MessageOrigin, SessionHistory};
use chatdesk_types::error::{ChatError, RepositoryError};
use chatdesk_types::user::UserId;
use tracing::info;
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::reply;

/// A persisted user message and the generated reply, in order.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: Message,
    pub reply: Message,
}

/// Orchestrates chat session lifecycle and message persistence.
///
/// Generic over `ChatRepository` to maintain clean architecture
/// (chatdesk-core never depends on chatdesk-infra).
pub struct ChatService<C: ChatRepository> {
    chat_repo: C,
}

impl<C: ChatRepository> ChatService<C> {
    /// Create a new chat service with the given repository.
    pub fn new(chat_repo: C) -> Self {
        Self { chat_repo }
    }

    /// Access the chat repository.
    pub fn chat_repo(&self) -> &C {
        &self.chat_repo
    }

    // --- Session lifecycle ---

    /// Create a new active session owned by `owner`.
    pub async fn create_session(&self, owner: UserId) -> Result<ChatSession, ChatError> {
        let session = self
            .chat_repo
            .create_session(&ChatSession::new(owner))
            .await
            .map_err(storage)?;

        info!(session_id = %session.id, user_id = %owner, "Chat session created");
        Ok(session)
    }

    /// List sessions owned by a user, oldest first.
    pub async fn list_sessions(&self, owner: &UserId) -> Result<Vec<ChatSession>, ChatError> {
        self.chat_repo.list_sessions(owner).await.map_err(storage)
    }

    /// Load a session and verify `caller` owns it.
    ///
    /// A missing session is reported before ownership is considered, so a
    /// caller probing random ids learns nothing about other users' sessions.
    pub async fn resolve_owned(
        &self,
        session_id: &Uuid,
        caller: &UserId,
    ) -> Result<ChatSession, ChatError> {
        let session = self
            .chat_repo
            .get_session(session_id)
            .await
            .map_err(storage)?
            .ok_or(ChatError::SessionNotFound)?;

        if session.user_id != *caller {
            return Err(ChatError::NotOwner);
        }
        Ok(session)
    }

    /// Get a session with its full transcript, ownership-checked.
    pub async fn get_history(
        &self,
        session_id: &Uuid,
        caller: &UserId,
    ) -> Result<SessionHistory, ChatError> {
        let session = self.resolve_owned(session_id, caller).await?;
        let messages = self
            .chat_repo
            .get_messages(session_id)
            .await
            .map_err(storage)?;

        Ok(SessionHistory { session, messages })
    }

    // --- Message exchange ---

    /// Persist one user message and the generated reply.
    ///
    /// Blank or whitespace-only content is rejected with `EmptyMessage`
    /// before anything touches storage. Ownership is the caller's concern
    /// (the channel resolves the session once, at bind time).
    pub async fn record_exchange(
        &self,
        session_id: Uuid,
        content: &str,
    ) -> Result<Exchange, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let user_message = Message::new(session_id, content, MessageOrigin::User);
        self.chat_repo
            .save_message(&user_message)
            .await
            .map_err(storage)?;

        let bot_message = Message::new(session_id, reply::generate(content), MessageOrigin::Bot);
        self.chat_repo
            .save_message(&bot_message)
            .await
            .map_err(storage)?;

        Ok(Exchange {
            user: user_message,
            reply: bot_message,
        })
    }
}

fn storage(err: RepositoryError) -> ChatError {
    ChatError::Storage(err.to_string())
}
