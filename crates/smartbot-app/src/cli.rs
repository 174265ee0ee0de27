//! CLI argument definitions for the SmartBot binary.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SmartBot - keyword-driven chat assistant demo.
#[derive(Parser, Debug)]
#[command(name = "smartbot", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API server.
    Serve {
        /// Bind port.
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,
        /// Bind address.
        #[arg(long = "host")]
        host: Option<String>,
        /// Seed the demo sessions and feedback.
        #[arg(long = "fixtures")]
        fixtures: bool,
    },
    /// Print the reply to a single message and exit.
    Ask {
        /// Message text; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Chat interactively on stdin. Type `quit` or `exit` to leave.
    Chat,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SMARTBOT_CONFIG env var > ~/.smartbot/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SMARTBOT_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Resolve the server port.
///
/// Priority: --port flag > SMARTBOT_PORT env var > config file value.
pub fn resolve_port(flag: Option<u16>, config_port: u16) -> u16 {
    if let Some(p) = flag {
        return p;
    }
    if let Ok(val) = std::env::var("SMARTBOT_PORT") {
        if let Ok(p) = val.parse::<u16>() {
            return p;
        }
    }
    config_port
}

/// Resolve the bind address.
///
/// Priority: --host flag > SMARTBOT_HOST env var > config file value.
pub fn resolve_host(flag: Option<String>, config_host: &str) -> String {
    if let Some(h) = flag {
        return h;
    }
    if let Ok(h) = std::env::var("SMARTBOT_HOST") {
        if !h.trim().is_empty() {
            return h;
        }
    }
    config_host.to_string()
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".smartbot").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".smartbot").join("config.toml");
    }
    PathBuf::from("config.toml")
}
