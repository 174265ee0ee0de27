//! Route handler functions for all API endpoints.
//!
//! Each handler extracts path parameters or a JSON body via axum
//! extractors, calls into AppState, and returns JSON.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use smartbot_core::types::{
    ChatMessageCreate, ChatMessageResponse, ChatSession, ContactForm, ContactFormResponse,
    FeedbackCreate, FeedbackEntry,
};

use crate::error::ApiError;
use crate::state::{AppState, ContactRecord};

/// Name reported by the health and root endpoints.
pub const SERVICE_NAME: &str = "SmartBot API";

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_secs: u64,
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET /api - service banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{} - AI-Powered Assistant", SERVICE_NAME),
    })
}

/// GET /api/health - liveness and uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /api/chat/message - answer a user message.
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<ChatMessageCreate>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    let reply = state.chat.send_message(body)?;
    Ok(Json(reply))
}

/// GET /api/chat/history/{session_id} - messages in chronological order.
pub async fn chat_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<ChatMessageResponse>>, ApiError> {
    Ok(Json(state.chat.history(&session_id)?))
}

/// POST /api/chat/session - open a new session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<ChatSession>, ApiError> {
    Ok(Json(state.chat.create_session()?))
}

/// GET /api/chat/sessions - sessions, most recently updated first.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatSession>>, ApiError> {
    Ok(Json(state.chat.sessions()?))
}

/// POST /api/chat/feedback - thumbs up/down on a bot reply.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(body): Json<FeedbackCreate>,
) -> Result<Json<FeedbackEntry>, ApiError> {
    Ok(Json(state.chat.record_feedback(body)?))
}

/// GET /api/chat/feedback/{session_id} - feedback left in a session.
pub async fn session_feedback(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<FeedbackEntry>>, ApiError> {
    Ok(Json(state.chat.feedback(&session_id)?))
}

/// POST /api/contact - store a contact form submission.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ContactFormResponse>, ApiError> {
    if form.name.trim().is_empty() || form.email.trim().is_empty() || form.message.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "Please fill in all required fields".to_string(),
        ));
    }
    if !form.email.contains('@') {
        return Err(ApiError::UnprocessableEntity(format!(
            "Invalid email address '{}'",
            form.email
        )));
    }

    let record = ContactRecord::received(form);
    let id = record.id;
    tracing::info!(
        contact_id = %id,
        feedback_type = ?record.feedback_type,
        "Contact form received"
    );
    state
        .contacts
        .lock()
        .map_err(|e| ApiError::Internal(format!("contact lock poisoned: {}", e)))?
        .push(record);

    Ok(Json(ContactFormResponse {
        id,
        status: "success".to_string(),
        message: "Thank you for your message. We'll get back to you soon!".to_string(),
    }))
}
