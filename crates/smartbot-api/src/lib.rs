//! SmartBot API crate - axum HTTP server and route handlers.
//!
//! Serves the chat demo backend: sending messages, session history,
//! reply feedback, the contact form, and health checks.

pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
