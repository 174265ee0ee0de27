//! Application state shared across all route handlers.
//!
//! AppState holds the chat service, the contact inbox, and the server
//! configuration. It is passed to handlers via axum's State extractor.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use smartbot_chat::{ChatService, RandomSource, ResponseResolver, ResponseTable, ThreadRandom};
use smartbot_core::config::SmartBotConfig;
use smartbot_core::error::Result;
use smartbot_core::types::{ContactForm, FeedbackType};

/// Chat service behind a swappable random source.
pub type SharedChat = ChatService<Box<dyn RandomSource>>;

/// A stored contact form submission.
#[derive(Debug, Clone, Serialize)]
pub struct ContactRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub feedback_type: FeedbackType,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

impl ContactRecord {
    pub fn received(form: ContactForm) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: form.name,
            email: form.email,
            subject: form.subject.filter(|s| !s.trim().is_empty()),
            message: form.message,
            feedback_type: form.feedback_type,
            created_at: Utc::now(),
            status: "received".to_string(),
        }
    }
}

/// Shared application state.
///
/// All fields use `Arc` so cloning per handler task stays cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<SmartBotConfig>,
    /// Chat sessions, messages and feedback.
    pub chat: Arc<SharedChat>,
    /// Contact form submissions.
    pub contacts: Arc<Mutex<Vec<ContactRecord>>>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// Loads a custom response table when `chat.responses_path` is set and
    /// seeds demo fixtures when `chat.seed_fixtures` is on.
    pub fn new(config: SmartBotConfig) -> Result<Self> {
        let random: Box<dyn RandomSource> = Box::new(ThreadRandom);
        let resolver = match config.chat.responses_path.as_deref() {
            Some(path) => ResponseResolver::with_random(ResponseTable::load(Path::new(path))?, random),
            None => ResponseResolver::builtin_with_random(random),
        };
        Ok(Self::with_resolver(config, resolver))
    }

    /// Build state around an existing resolver.
    pub fn with_resolver(
        config: SmartBotConfig,
        resolver: ResponseResolver<Box<dyn RandomSource>>,
    ) -> Self {
        let chat = if config.chat.seed_fixtures {
            ChatService::with_fixtures(resolver, config.chat.clone())
        } else {
            ChatService::new(resolver, config.chat.clone())
        };
        tracing::debug!(
            triggers = chat.resolver().table().len(),
            seed_fixtures = config.chat.seed_fixtures,
            "Chat service ready"
        );
        Self {
            config: Arc::new(config),
            chat: Arc::new(chat),
            contacts: Arc::new(Mutex::new(Vec::new())),
            start_time: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_builtin_table() {
        let state = AppState::new(SmartBotConfig::default()).unwrap();
        assert_eq!(state.chat.resolver().table().len(), 21);
        assert!(state.chat.sessions().unwrap().is_empty());
    }

    #[test]
    fn test_new_seeds_fixtures() {
        let mut config = SmartBotConfig::default();
        config.chat.seed_fixtures = true;
        let state = AppState::new(config).unwrap();
        assert_eq!(state.chat.sessions().unwrap().len(), 2);
    }

    #[test]
    fn test_new_with_missing_table_fails() {
        let mut config = SmartBotConfig::default();
        config.chat.responses_path = Some("/nonexistent/responses.toml".to_string());
        assert!(AppState::new(config).is_err());
    }

    #[test]
    fn test_contact_record_drops_blank_subject() {
        let record = ContactRecord::received(ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: Some("  ".into()),
            message: "Hello".into(),
            feedback_type: FeedbackType::Bug,
        });
        assert!(record.subject.is_none());
        assert_eq!(record.status, "received");
        assert_eq!(record.feedback_type, FeedbackType::Bug);
    }
}
