pub mod config;
pub mod error;
pub mod types;

pub use config::SmartBotConfig;
pub use error::{Result, SmartBotError};
pub use types::*;
