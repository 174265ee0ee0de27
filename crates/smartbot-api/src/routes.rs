//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression, a body
//! limit, and the rate-limited chat and contact routes.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use smartbot_core::config::SmartBotConfig;
use smartbot_core::error::SmartBotError;

use crate::handlers;
use crate::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::state::AppState;

/// Request bodies larger than this are rejected with 413.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The demo frontend may be served from any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let limiter = RateLimiter::new(state.config.server.rate_limit_per_sec);

    let public_routes = Router::new()
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        .route("/api/health", get(handlers::health))
        .route("/api/chat/history/{session_id}", get(handlers::chat_history))
        .route("/api/chat/sessions", get(handlers::list_sessions))
        .route(
            "/api/chat/feedback/{session_id}",
            get(handlers::session_feedback),
        );

    let rate_limited_routes = Router::new()
        .route("/api/chat/message", post(handlers::send_message))
        .route("/api/chat/session", post(handlers::create_session))
        .route("/api/chat/feedback", post(handlers::submit_feedback))
        .route("/api/contact", post(handlers::submit_contact))
        .layer(axum::middleware::from_fn(rate_limit_middleware))
        .layer(axum::Extension(limiter));

    public_routes
        .merge(rate_limited_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn start_server(config: &SmartBotConfig, state: AppState) -> Result<(), SmartBotError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SmartBotError::Api(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("SmartBot API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SmartBotError::Api(format!("Server error: {}", e)))?;

    tracing::info!("SmartBot API shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
