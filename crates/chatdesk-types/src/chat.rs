//! Chat session and message types for Chatdesk.
//!
//! These types model support conversations: sessions owned by a user, and
//! the messages exchanged within a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Who authored a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (origin IN ('user', 'bot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageOrigin {
    User,
    Bot,
}

impl fmt::Display for MessageOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageOrigin::User => write!(f, "user"),
            MessageOrigin::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for MessageOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageOrigin::User),
            "bot" => Ok(MessageOrigin::Bot),
            other => Err(format!("invalid message origin: '{other}'")),
        }
    }
}

/// A support conversation owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl ChatSession {
    /// Create a fresh active session for `owner`.
    pub fn new(owner: UserId) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: owner,
            created_at: Utc::now(),
            is_active: true,
        }
    }
}

/// A single message within a chat session.
///
/// Messages are ordered by `created_at` within a session and are immutable
/// once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub session_id: Uuid,
    pub content: String,
    pub origin: MessageOrigin,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(session_id: Uuid, content: impl Into<String>, origin: MessageOrigin) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id,
            content: content.into(),
            origin,
            created_at: Utc::now(),
        }
    }
}

/// A session together with its full message transcript, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHistory {
    #[serde(flatten)]
    pub session: ChatSession,
    pub messages: Vec<Message>,
}
