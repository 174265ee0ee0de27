//! In-memory chat service.
//!
//! Stores sessions, messages and feedback in process memory and answers
//! every message through a [`ResponseResolver`].

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use smartbot_core::config::ChatConfig;
use smartbot_core::types::{
    ChatMessage, ChatMessageCreate, ChatMessageResponse, ChatSession, FeedbackCreate,
    FeedbackEntry, MessageKind,
};

use crate::error::ChatError;
use crate::mock_data;
use crate::random::{RandomSource, ThreadRandom};
use crate::resolver::ResponseResolver;

/// Greeting shown when a chat opens.
pub const WELCOME_MESSAGE: &str = "Hi! I'm SmartBot, your AI assistant powered by Gemini. I'm here to help you with accurate, intelligent responses. Ask me anything!";

/// Maximum sessions returned by [`ChatService::sessions`].
const SESSION_LIST_LIMIT: usize = 100;

/// Chat backend answering from the mock resolver.
pub struct ChatService<R = ThreadRandom> {
    resolver: ResponseResolver<R>,
    config: ChatConfig,
    sessions: Mutex<HashMap<String, ChatSession>>,
    messages: Mutex<HashMap<String, Vec<ChatMessage>>>,
    feedback: Mutex<Vec<FeedbackEntry>>,
}

impl<R: RandomSource> ChatService<R> {
    /// Create an empty service.
    pub fn new(resolver: ResponseResolver<R>, config: ChatConfig) -> Self {
        Self {
            resolver,
            config,
            sessions: Mutex::new(HashMap::new()),
            messages: Mutex::new(HashMap::new()),
            feedback: Mutex::new(Vec::new()),
        }
    }

    /// Create a service pre-seeded with the demo sessions and feedback.
    pub fn with_fixtures(resolver: ResponseResolver<R>, config: ChatConfig) -> Self {
        let now = Utc::now();
        let sessions = mock_data::sessions(now)
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        Self {
            resolver,
            config,
            sessions: Mutex::new(sessions),
            messages: Mutex::new(HashMap::new()),
            feedback: Mutex::new(mock_data::feedback(now)),
        }
    }

    pub fn resolver(&self) -> &ResponseResolver<R> {
        &self.resolver
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Open a new empty session.
    pub fn create_session(&self) -> Result<ChatSession, ChatError> {
        let session = ChatSession::new(Uuid::new_v4().to_string());
        self.lock_sessions()?
            .insert(session.id.clone(), session.clone());
        tracing::info!(session_id = %session.id, "Chat session created");
        Ok(session)
    }

    /// Greeting message for a freshly opened chat. Not stored.
    pub fn welcome_message(&self, session_id: &str) -> ChatMessageResponse {
        ChatMessageResponse::from(&ChatMessage::new(
            session_id,
            MessageKind::Bot,
            WELCOME_MESSAGE,
        ))
    }

    /// Store a user message, resolve a reply, store it, and return it.
    pub fn send_message(
        &self,
        request: ChatMessageCreate,
    ) -> Result<ChatMessageResponse, ChatError> {
        if !self.config.enabled {
            return Err(ChatError::Disabled);
        }
        if request.session_id.trim().is_empty() {
            return Err(ChatError::EmptySessionId);
        }
        if request.content.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if request.content.chars().count() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong(self.config.max_message_length));
        }

        let user_message = ChatMessage::new(
            request.session_id.clone(),
            MessageKind::User,
            request.content.clone(),
        );
        let resolution = self.resolver.resolve_detailed(&request.content);
        let mut bot_message = ChatMessage::new(
            request.session_id.clone(),
            MessageKind::Bot,
            resolution.reply,
        );
        if bot_message.timestamp < user_message.timestamp {
            bot_message.timestamp = user_message.timestamp;
        }
        let response = ChatMessageResponse::from(&bot_message);

        {
            let mut messages = self.lock_messages()?;
            let thread = messages.entry(request.session_id.clone()).or_default();
            thread.push(user_message);
            thread.push(bot_message);
        }
        {
            let mut sessions = self.lock_sessions()?;
            let session = sessions
                .entry(request.session_id.clone())
                .or_insert_with(|| ChatSession::new(request.session_id.clone()));
            session.updated_at = response.timestamp;
            session.message_count += 2;
        }

        tracing::info!(
            session_id = %request.session_id,
            matched = %resolution.matched,
            "Chat message answered"
        );
        Ok(response)
    }

    /// Messages of a session in chronological order.
    ///
    /// Unknown sessions yield an empty list.
    pub fn history(&self, session_id: &str) -> Result<Vec<ChatMessageResponse>, ChatError> {
        let messages = self.lock_messages()?;
        let Some(thread) = messages.get(session_id) else {
            return Ok(Vec::new());
        };
        let mut history: Vec<ChatMessageResponse> =
            thread.iter().map(ChatMessageResponse::from).collect();
        history.sort_by_key(|m| m.timestamp);
        history.truncate(self.config.history_limit);
        Ok(history)
    }

    /// Sessions, most recently updated first.
    pub fn sessions(&self) -> Result<Vec<ChatSession>, ChatError> {
        let mut list: Vec<ChatSession> = self.lock_sessions()?.values().cloned().collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        list.truncate(SESSION_LIST_LIMIT);
        Ok(list)
    }

    /// Record thumbs up/down on a bot reply of the given session.
    pub fn record_feedback(&self, request: FeedbackCreate) -> Result<FeedbackEntry, ChatError> {
        let known = self
            .lock_messages()?
            .get(&request.session_id)
            .map(|thread| {
                thread.iter().any(|m| {
                    m.kind == MessageKind::Bot && m.id.to_string() == request.message_id
                })
            })
            .unwrap_or(false);
        if !known {
            return Err(ChatError::MessageNotFound(request.message_id));
        }

        let entry = FeedbackEntry {
            id: Uuid::new_v4().to_string(),
            session_id: request.session_id,
            message_id: request.message_id,
            kind: request.kind,
            timestamp: Utc::now(),
            comment: request.comment.filter(|c| !c.trim().is_empty()),
        };
        self.feedback
            .lock()
            .map_err(|e| ChatError::StorageError(format!("feedback lock poisoned: {}", e)))?
            .push(entry.clone());
        tracing::info!(
            session_id = %entry.session_id,
            message_id = %entry.message_id,
            kind = ?entry.kind,
            "Feedback recorded"
        );
        Ok(entry)
    }

    /// Feedback recorded for a session, oldest first.
    pub fn feedback(&self, session_id: &str) -> Result<Vec<FeedbackEntry>, ChatError> {
        let entries = self
            .feedback
            .lock()
            .map_err(|e| ChatError::StorageError(format!("feedback lock poisoned: {}", e)))?;
        Ok(entries
            .iter()
            .filter(|f| f.session_id == session_id)
            .cloned()
            .collect())
    }

    fn lock_sessions(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, ChatSession>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|e| ChatError::StorageError(format!("session lock poisoned: {}", e)))
    }

    fn lock_messages(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<ChatMessage>>>, ChatError> {
        self.messages
            .lock()
            .map_err(|e| ChatError::StorageError(format!("message lock poisoned: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedIndex;
    use crate::resolver::GRATITUDE_REPLY;
    use crate::table::ResponseTable;
    use smartbot_core::types::FeedbackKind;

    fn make_service() -> ChatService<FixedIndex> {
        ChatService::new(
            ResponseResolver::builtin_with_random(FixedIndex(0)),
            ChatConfig::default(),
        )
    }

    fn send(service: &ChatService<FixedIndex>, session: &str, content: &str) -> ChatMessageResponse {
        service
            .send_message(ChatMessageCreate {
                session_id: session.to_string(),
                content: content.to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_send_message_returns_bot_reply() {
        let service = make_service();
        let resp = send(&service, "s1", "hello");
        assert_eq!(resp.kind, MessageKind::Bot);
        assert_eq!(resp.session_id, "s1");
        assert_eq!(resp.content, ResponseTable::builtin().get("hello").unwrap());
    }

    #[test]
    fn test_send_message_stores_both_sides() {
        let service = make_service();
        send(&service, "s1", "thanks");
        let history = service.history("s1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind, MessageKind::User);
        assert_eq!(history[0].content, "thanks");
        assert_eq!(history[1].kind, MessageKind::Bot);
        assert_eq!(history[1].content, GRATITUDE_REPLY);
        assert!(history[0].timestamp <= history[1].timestamp);
    }

    #[test]
    fn test_send_message_upserts_session() {
        let service = make_service();
        send(&service, "s1", "hi");
        send(&service, "s1", "css");
        let sessions = service.sessions().unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "s1");
        assert_eq!(sessions[0].message_count, 4);
        assert_eq!(sessions[0].title, "New Chat");
    }

    #[test]
    fn test_send_message_validation() {
        let service = make_service();
        let err = service
            .send_message(ChatMessageCreate {
                session_id: "s".into(),
                content: "   ".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));

        let err = service
            .send_message(ChatMessageCreate {
                session_id: "".into(),
                content: "hello".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ChatError::EmptySessionId));

        let err = service
            .send_message(ChatMessageCreate {
                session_id: "s".into(),
                content: "x".repeat(2001),
            })
            .unwrap_err();
        assert!(matches!(err, ChatError::MessageTooLong(2000)));
        assert!(service.history("s").unwrap().is_empty());
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let config = ChatConfig {
            max_message_length: 3,
            ..ChatConfig::default()
        };
        let service = ChatService::new(ResponseResolver::builtin_with_random(FixedIndex(0)), config);
        let ok = service.send_message(ChatMessageCreate {
            session_id: "s".into(),
            content: "héé".into(),
        });
        assert!(ok.is_ok());
    }

    #[test]
    fn test_disabled_service_rejects() {
        let config = ChatConfig {
            enabled: false,
            ..ChatConfig::default()
        };
        let service = ChatService::new(ResponseResolver::builtin_with_random(FixedIndex(0)), config);
        let err = service
            .send_message(ChatMessageCreate {
                session_id: "s".into(),
                content: "hello".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ChatError::Disabled));
    }

    #[test]
    fn test_history_unknown_session_is_empty() {
        let service = make_service();
        assert!(service.history("missing").unwrap().is_empty());
    }

    #[test]
    fn test_history_respects_limit() {
        let config = ChatConfig {
            history_limit: 3,
            ..ChatConfig::default()
        };
        let service = ChatService::new(ResponseResolver::builtin_with_random(FixedIndex(0)), config);
        for text in ["one", "two", "three"] {
            service
                .send_message(ChatMessageCreate {
                    session_id: "s".into(),
                    content: text.into(),
                })
                .unwrap();
        }
        let history = service.history("s").unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, "one");
    }

    #[test]
    fn test_create_session_is_listed() {
        let service = make_service();
        let session = service.create_session().unwrap();
        assert!(Uuid::parse_str(&session.id).is_ok());
        let sessions = service.sessions().unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].message_count, 0);
    }

    #[test]
    fn test_sessions_sorted_most_recent_first() {
        let service = ChatService::with_fixtures(
            ResponseResolver::builtin_with_random(FixedIndex(0)),
            ChatConfig::default(),
        );
        send(&service, "fresh", "hello");
        let ids: Vec<String> = service.sessions().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["fresh", "session_2", "session_1"]);
    }

    #[test]
    fn test_fixture_feedback_is_seeded() {
        let service = ChatService::with_fixtures(
            ResponseResolver::builtin_with_random(FixedIndex(0)),
            ChatConfig::default(),
        );
        let entries = service.feedback("session_1").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, FeedbackKind::Positive);
    }

    #[test]
    fn test_record_feedback_on_bot_message() {
        let service = make_service();
        let reply = send(&service, "s1", "python");
        let entry = service
            .record_feedback(FeedbackCreate {
                session_id: "s1".into(),
                message_id: reply.id.to_string(),
                kind: FeedbackKind::Positive,
                comment: Some("  ".into()),
            })
            .unwrap();
        assert_eq!(entry.kind, FeedbackKind::Positive);
        assert!(entry.comment.is_none());
        assert_eq!(service.feedback("s1").unwrap().len(), 1);
    }

    #[test]
    fn test_record_feedback_rejects_user_or_unknown_message() {
        let service = make_service();
        send(&service, "s1", "python");
        let user_id = service.history("s1").unwrap()[0].id;

        let err = service
            .record_feedback(FeedbackCreate {
                session_id: "s1".into(),
                message_id: user_id.to_string(),
                kind: FeedbackKind::Negative,
                comment: None,
            })
            .unwrap_err();
        assert!(matches!(err, ChatError::MessageNotFound(_)));

        let err = service
            .record_feedback(FeedbackCreate {
                session_id: "other".into(),
                message_id: Uuid::new_v4().to_string(),
                kind: FeedbackKind::Negative,
                comment: None,
            })
            .unwrap_err();
        assert!(matches!(err, ChatError::MessageNotFound(_)));
    }

    #[test]
    fn test_welcome_message() {
        let service = make_service();
        let msg = service.welcome_message("s9");
        assert_eq!(msg.kind, MessageKind::Bot);
        assert_eq!(msg.content, WELCOME_MESSAGE);
        assert_eq!(msg.session_id, "s9");
        assert!(service.history("s9").unwrap().is_empty());
    }
}
