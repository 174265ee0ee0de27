//! Error types for the chat engine.

use smartbot_core::error::SmartBotError;

/// Errors raised while building a response table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("default sequence must not be empty")]
    EmptyDefaults,
    #[error("trigger must not be empty")]
    EmptyTrigger,
    #[error("trigger \"default\" is reserved for the fallback sequence")]
    ReservedTrigger,
    #[error("duplicate trigger: {0}")]
    DuplicateTrigger(String),
    #[error("invalid response table: {0}")]
    Parse(String),
    #[error("failed to read response table: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for TableError {
    fn from(err: toml::de::Error) -> Self {
        TableError::Parse(err.to_string())
    }
}

/// Errors from the chat service.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat is disabled")]
    Disabled,
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("session id cannot be empty")]
    EmptySessionId,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("message not found: {0}")]
    MessageNotFound(String),
    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<TableError> for SmartBotError {
    fn from(err: TableError) -> Self {
        SmartBotError::Table(err.to_string())
    }
}

impl From<ChatError> for SmartBotError {
    fn from(err: ChatError) -> Self {
        SmartBotError::Chat(err.to_string())
    }
}
