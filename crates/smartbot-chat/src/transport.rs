//! The seam between a chat UI and whatever answers its messages.

use async_trait::async_trait;

use smartbot_core::types::{ChatMessage, ChatMessageCreate, ChatMessageResponse, MessageKind};

use crate::error::ChatError;
use crate::random::RandomSource;
use crate::service::ChatService;

/// Reply shown in place of a bot answer when the transport fails.
pub const APOLOGY_MESSAGE: &str = "I apologize, but I'm having trouble processing your request right now. Please try again in a moment.";

/// Sends a user message somewhere and returns the bot's reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: ChatMessageCreate) -> Result<ChatMessageResponse, ChatError>;
}

#[async_trait]
impl<R: RandomSource> ChatTransport for ChatService<R> {
    async fn send(&self, request: ChatMessageCreate) -> Result<ChatMessageResponse, ChatError> {
        self.send_message(request)
    }
}

/// Send through a transport, turning failures into an apology bubble.
pub async fn send_or_apologize(
    transport: &dyn ChatTransport,
    request: ChatMessageCreate,
) -> ChatMessageResponse {
    let session_id = request.session_id.clone();
    match transport.send(request).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(session_id = %session_id, error = %e, "Chat transport failed");
            ChatMessageResponse::from(&ChatMessage::new(
                session_id,
                MessageKind::Bot,
                APOLOGY_MESSAGE,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedIndex;
    use crate::resolver::{ResponseResolver, FAREWELL_REPLY};
    use smartbot_core::config::ChatConfig;

    struct Offline;

    #[async_trait]
    impl ChatTransport for Offline {
        async fn send(
            &self,
            _request: ChatMessageCreate,
        ) -> Result<ChatMessageResponse, ChatError> {
            Err(ChatError::StorageError("connection refused".into()))
        }
    }

    fn request(content: &str) -> ChatMessageCreate {
        ChatMessageCreate {
            session_id: "session_x".into(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn test_service_as_transport() {
        let service = ChatService::new(
            ResponseResolver::builtin_with_random(FixedIndex(0)),
            ChatConfig::default(),
        );
        let reply = service.send(request("bye")).await.unwrap();
        assert_eq!(reply.content, FAREWELL_REPLY);
    }

    #[tokio::test]
    async fn test_send_or_apologize_passes_through() {
        let service = ChatService::new(
            ResponseResolver::builtin_with_random(FixedIndex(0)),
            ChatConfig::default(),
        );
        let reply = send_or_apologize(&service, request("goodbye")).await;
        assert_eq!(reply.content, FAREWELL_REPLY);
    }

    #[tokio::test]
    async fn test_send_or_apologize_on_failure() {
        let reply = send_or_apologize(&Offline, request("hello")).await;
        assert_eq!(reply.content, APOLOGY_MESSAGE);
        assert_eq!(reply.kind, MessageKind::Bot);
        assert_eq!(reply.session_id, "session_x");
    }

    #[tokio::test]
    async fn test_validation_errors_become_apology() {
        let service = ChatService::new(
            ResponseResolver::builtin_with_random(FixedIndex(0)),
            ChatConfig::default(),
        );
        let reply = send_or_apologize(&service, request("   ")).await;
        assert_eq!(reply.content, APOLOGY_MESSAGE);
    }
}
