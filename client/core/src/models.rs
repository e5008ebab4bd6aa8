//! Conversation and Message Types
//!
//! The data model shared by the view-model, the service client, and every
//! surface that renders them.
//!
//! Local types ([`Conversation`], [`Message`]) are what the view-model stores.
//! Wire records ([`MessageRecord`], [`NewMessage`], [`SendMessageResponse`])
//! mirror the JSON spoken by the conversation service and convert into the
//! local shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Server-assigned conversation identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub i64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key used by surfaces to identify a rendered message
///
/// Server and optimistic messages carry an id; anything without one falls
/// back to its position in the displayed sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderKey {
    /// Message identifier (server-assigned or timestamp-derived)
    Id(i64),
    /// Position in the message sequence
    Position(usize),
}

// ============================================================================
// Conversations
// ============================================================================

/// A conversation as listed by the service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Server-assigned identifier
    pub id: ConversationId,
    /// Optional human-readable title
    #[serde(default)]
    pub title: Option<String>,
    /// Creation timestamp (ISO-8601) as reported by the service
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Conversation {
    /// Create an untitled conversation
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id: ConversationId(id),
            title: None,
            created_at: None,
        }
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title to show in a conversation list
    ///
    /// Falls back to `Chat {id}` when the service sent no (or a blank) title.
    #[must_use]
    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Chat {}", self.id),
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Who authored a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The person typing into the client
    User,
    /// The service's reply
    Assistant,
}

impl MessageRole {
    /// Wire name of the role
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message displayed in the active conversation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Identifier, if known
    pub id: Option<i64>,
    /// Author
    pub role: MessageRole,
    /// Message text
    pub content: String,
    /// Creation timestamp (ISO-8601)
    pub created_at: Option<String>,
}

impl Message {
    /// Create a message without id or timestamp
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: None,
            role,
            content: content.into(),
            created_at: None,
        }
    }

    /// Set the identifier
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Build the locally synthesized user message shown before the service
    /// has seen it.
    ///
    /// The id is the current wall-clock time in milliseconds, so two sends
    /// in the same millisecond share an id.
    #[must_use]
    pub fn optimistic_user(content: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Some(now.timestamp_millis()),
            role: MessageRole::User,
            content: content.into(),
            created_at: Some(now.to_rfc3339()),
        }
    }

    /// Render key for this message at `position` in the sequence
    #[must_use]
    pub fn render_key(&self, position: usize) -> RenderKey {
        self.id.map_or(RenderKey::Position(position), RenderKey::Id)
    }
}

// ============================================================================
// Wire Records
// ============================================================================

/// A message as the service returns it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Server-assigned identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Author
    pub role: MessageRole,
    /// Message text
    pub content: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Owning conversation (the client already knows it, so it is dropped
    /// when converting)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            role: record.role,
            content: record.content,
            created_at: record.created_at,
        }
    }
}

/// Body of a message creation request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    /// Message text
    pub content: String,
    /// Author (always `user` from this client)
    pub role: MessageRole,
}

impl NewMessage {
    /// A user-authored message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: MessageRole::User,
        }
    }
}

/// Response to a message creation request
///
/// The service echoes the stored user message and, when it produced one,
/// the assistant reply. Either may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    /// The stored user message
    #[serde(default)]
    pub user: Option<MessageRecord>,
    /// The assistant's reply
    #[serde(default)]
    pub assistant: Option<MessageRecord>,
}
