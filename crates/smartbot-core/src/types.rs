use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    User,
    Bot,
}

/// Thumbs up or down on a bot reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Positive,
    Negative,
}

/// Category picked on the contact form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    #[default]
    General,
    Feedback,
    Bug,
    Feature,
    Collaboration,
}

// =============================================================================
// Chat
// =============================================================================

/// A stored chat message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message stamped with a fresh id and the current time.
    pub fn new(session_id: impl Into<String>, kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: session_id.into(),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Body of a send-message request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageCreate {
    pub session_id: String,
    pub content: String,
}

/// A message as returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
}

impl From<&ChatMessage> for ChatMessageResponse {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            id: msg.id,
            kind: msg.kind,
            content: msg.content.clone(),
            timestamp: msg.timestamp,
            session_id: msg.session_id.clone(),
        }
    }
}

/// Summary record of a chat session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: u64,
    pub title: String,
    /// Topics discussed, only populated for demo fixtures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
}

impl ChatSession {
    /// Title given to every new session.
    pub const DEFAULT_TITLE: &'static str = "New Chat";

    /// Create an empty session with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
            message_count: 0,
            title: Self::DEFAULT_TITLE.to_string(),
            topics: Vec::new(),
        }
    }
}

/// Feedback left on a bot message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: String,
    pub session_id: String,
    pub message_id: String,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Body of a feedback request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackCreate {
    pub session_id: String,
    pub message_id: String,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    #[serde(default)]
    pub comment: Option<String>,
}

// =============================================================================
// Contact
// =============================================================================

/// Contact form submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub feedback_type: FeedbackType,
}

/// Acknowledgement returned for a contact submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormResponse {
    pub id: Uuid,
    pub status: String,
    pub message: String,
}
