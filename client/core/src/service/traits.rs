//! Conversation Service Traits
//!
//! Trait definition for the conversation backend. The view-model only ever
//! talks to a `ConversationService`, which keeps it independent of HTTP and
//! lets tests substitute scripted services.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Conversation, ConversationId, MessageRecord, NewMessage, SendMessageResponse,
};

/// Errors returned by a conversation service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced a response (connection refused, DNS, ...)
    #[error("request to conversation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("conversation service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if it could be read
        body: String,
    },

    /// The response body was not the JSON shape we expected
    #[error("malformed response from conversation service: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ServiceError {
    /// Whether the service reported the resource as missing
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Result alias for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Conversation service trait
///
/// Implementations own the transport details; every method maps to one
/// request against the backend.
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Service name for diagnostics (e.g., "HTTP")
    fn name(&self) -> &str;

    /// List every conversation
    async fn list_conversations(&self) -> ServiceResult<Vec<Conversation>>;

    /// Create a new, empty conversation
    async fn create_conversation(&self) -> ServiceResult<Conversation>;

    /// Fetch a single conversation
    async fn get_conversation(&self, id: ConversationId) -> ServiceResult<Conversation>;

    /// Delete a conversation and its messages
    async fn delete_conversation(&self, id: ConversationId) -> ServiceResult<()>;

    /// List the messages of a conversation in display order
    async fn list_messages(&self, id: ConversationId) -> ServiceResult<Vec<MessageRecord>>;

    /// Post a message, returning the stored message and any assistant reply
    async fn post_message(
        &self,
        id: ConversationId,
        message: &NewMessage,
    ) -> ServiceResult<SendMessageResponse>;

    /// Check whether the service is reachable
    async fn health_check(&self) -> bool {
        self.list_conversations().await.is_ok()
    }
}
