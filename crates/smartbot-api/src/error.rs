//! API error types and JSON error response formatting.
//!
//! ApiError gives every endpoint the same JSON error shape and maps chat
//! and configuration errors to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use smartbot_chat::ChatError;
use smartbot_core::error::SmartBotError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "bad_request", "not_found").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - missing or invalid fields.
    BadRequest(String),
    /// 404 Not Found - resource does not exist.
    NotFound(String),
    /// 422 Unprocessable Entity - well-formed but semantically invalid.
    UnprocessableEntity(String),
    /// 500 Internal Server Error.
    Internal(String),
    /// 503 Service Unavailable - chat disabled.
    ServiceUnavailable(String),
}

impl ApiError {
    fn parts(self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable_entity", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "Request failed");
        }
        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Disabled => ApiError::ServiceUnavailable(err.to_string()),
            ChatError::EmptyMessage | ChatError::EmptySessionId => {
                ApiError::BadRequest(err.to_string())
            }
            ChatError::MessageTooLong(_) => ApiError::UnprocessableEntity(err.to_string()),
            ChatError::MessageNotFound(_) => ApiError::NotFound(err.to_string()),
            ChatError::StorageError(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<SmartBotError> for ApiError {
    fn from(err: SmartBotError) -> Self {
        match &err {
            SmartBotError::Config(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_mapping() {
        let cases: Vec<(ChatError, StatusCode)> = vec![
            (ChatError::Disabled, StatusCode::SERVICE_UNAVAILABLE),
            (ChatError::EmptyMessage, StatusCode::BAD_REQUEST),
            (ChatError::EmptySessionId, StatusCode::BAD_REQUEST),
            (ChatError::MessageTooLong(10), StatusCode::UNPROCESSABLE_ENTITY),
            (ChatError::MessageNotFound("m".into()), StatusCode::NOT_FOUND),
            (
                ChatError::StorageError("poisoned".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let resp = ApiError::from(err).into_response();
            assert_eq!(resp.status(), expected);
        }
    }

    #[test]
    fn test_config_error_is_bad_request() {
        let err: ApiError = SmartBotError::Config("bad".into()).into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "bad"));

        let err: ApiError = SmartBotError::Api("boom".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_parts_error_codes() {
        let (status, code, msg) = ApiError::NotFound("gone".into()).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "not_found");
        assert_eq!(msg, "gone");
    }
}
