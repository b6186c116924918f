use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Maximum chat title length in characters. New chats are titled with the
/// first user message, cut to this length.
pub const TITLE_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chat {
    pub id: i64,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Author of a message turn. Stored as lowercase text in the messages table,
/// mirrored by a CHECK constraint in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl From<Chat> for shared::ChatSummary {
    fn from(chat: Chat) -> Self {
        shared::ChatSummary {
            id: chat.id,
            title: chat.title,
            created_at: chat.created_at,
        }
    }
}

impl From<Message> for shared::MessageView {
    fn from(message: Message) -> Self {
        shared::MessageView {
            id: message.id,
            role: message.role,
            content: message.content,
            created_at: message.created_at,
        }
    }
}
