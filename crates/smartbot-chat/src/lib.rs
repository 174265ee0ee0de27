//! Chat engine for SmartBot.
//!
//! Resolves user input to replies from a keyword table, and keeps chat
//! sessions, history and feedback in memory for the demo backend.

pub mod error;
pub mod mock_data;
pub mod random;
pub mod resolver;
pub mod service;
pub mod table;
pub mod transport;

pub use error::{ChatError, TableError};
pub use random::{Cycle, FixedIndex, RandomSource, ThreadRandom};
pub use resolver::{resolve, MatchKind, Resolution, ResponseResolver};
pub use service::{ChatService, WELCOME_MESSAGE};
pub use table::ResponseTable;
pub use transport::{send_or_apologize, ChatTransport, APOLOGY_MESSAGE};
