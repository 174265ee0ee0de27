use thiserror::Error;

/// Top-level error type for the SmartBot workspace.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for SmartBotError` so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SmartBotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Response table error: {0}")]
    Table(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for SmartBotError {
    fn from(err: toml::de::Error) -> Self {
        SmartBotError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SmartBotError {
    fn from(err: toml::ser::Error) -> Self {
        SmartBotError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SmartBotError {
    fn from(err: serde_json::Error) -> Self {
        SmartBotError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for SmartBot operations.
pub type Result<T> = std::result::Result<T, SmartBotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SmartBotError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SmartBotError = io_err.into();
        assert!(matches!(err, SmartBotError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: SmartBotError = toml_err.into();
        assert!(matches!(err, SmartBotError::Config(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SmartBotError = json_err.into();
        assert!(matches!(err, SmartBotError::Serialization(_)));
    }

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(SmartBotError, &str)> = vec![
            (SmartBotError::Config("bad key".into()), "Configuration error: bad key"),
            (SmartBotError::Chat("disabled".into()), "Chat error: disabled"),
            (
                SmartBotError::Table("no defaults".into()),
                "Response table error: no defaults",
            ),
            (SmartBotError::Api("bind failed".into()), "API error: bind failed"),
            (
                SmartBotError::Serialization("eof".into()),
                "Serialization error: eof",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }
}
