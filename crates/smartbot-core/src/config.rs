use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SmartBotError};

/// Log levels accepted by `general.log_level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Top-level configuration for SmartBot.
///
/// Loaded from `~/.smartbot/config.toml` by default. Every section and field
/// is optional in the file; missing values fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmartBotConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl SmartBotConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SmartBotConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            return Err(SmartBotError::Config(format!(
                "general.log_level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.general.log_level
            )));
        }
        if self.server.host.trim().is_empty() {
            return Err(SmartBotError::Config("server.host must not be empty".into()));
        }
        if self.server.rate_limit_per_sec == 0 {
            return Err(SmartBotError::Config(
                "server.rate_limit_per_sec must be greater than 0".into(),
            ));
        }
        if self.chat.max_message_length == 0 {
            return Err(SmartBotError::Config(
                "chat.max_message_length must be greater than 0".into(),
            ));
        }
        if self.chat.history_limit == 0 {
            return Err(SmartBotError::Config(
                "chat.history_limit must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Chat requests accepted per second before answering 429.
    pub rate_limit_per_sec: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8001,
            rate_limit_per_sec: 100,
        }
    }
}

/// Chat engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Whether the chat endpoints accept messages.
    pub enabled: bool,
    /// Maximum message length in characters.
    pub max_message_length: usize,
    /// Maximum number of messages returned by a history lookup.
    pub history_limit: usize,
    /// Seed the in-memory store with the demo sessions and feedback.
    pub seed_fixtures: bool,
    /// Optional TOML file replacing the built-in response table.
    pub responses_path: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_message_length: 2000,
            history_limit: 1000,
            seed_fixtures: false,
            responses_path: None,
        }
    }
}
