//! HTTP Conversation Service
//!
//! REST client for the conversation backend.
//!
//! # Endpoints
//!
//! - `GET    /conversations/` - list conversations
//! - `POST   /conversations/` - create a conversation (empty JSON body)
//! - `GET    /conversations/{id}` - fetch one conversation
//! - `DELETE /conversations/{id}` - delete a conversation
//! - `GET    /conversations/{id}/messages` - list messages
//! - `POST   /conversations/{id}/messages` - post a message, maybe get a reply
//!
//! Every non-2xx response is reported as [`ServiceError::Status`].

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::traits::{ConversationService, ServiceError, ServiceResult};
use crate::config::ClientConfig;
use crate::models::{
    Conversation, ConversationId, MessageRecord, NewMessage, SendMessageResponse,
};

/// HTTP conversation service client
#[derive(Clone, Debug)]
pub struct HttpConversationService {
    /// Base URL without trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpConversationService {
    /// Create a client with no request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> ServiceResult<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> ServiceResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: builder.build()?,
        })
    }

    /// Create from a loaded [`ClientConfig`]
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> ServiceResult<Self> {
        Self::with_timeout(config.base_url.clone(), config.request_timeout)
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Collection endpoint (the backend routes it with a trailing slash)
    fn conversations_url(&self) -> String {
        format!("{}/conversations/", self.base_url)
    }

    fn conversation_url(&self, id: ConversationId) -> String {
        format!("{}/conversations/{id}", self.base_url)
    }

    fn messages_url(&self, id: ConversationId) -> String {
        format!("{}/conversations/{id}/messages", self.base_url)
    }

    /// Turn a non-2xx response into a status error
    async fn check_status(response: reqwest::Response) -> ServiceResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Check the status and decode the JSON body
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ServiceResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ConversationService for HttpConversationService {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn list_conversations(&self) -> ServiceResult<Vec<Conversation>> {
        let response = self
            .http_client
            .get(self.conversations_url())
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_conversation(&self) -> ServiceResult<Conversation> {
        let response = self
            .http_client
            .post(self.conversations_url())
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_conversation(&self, id: ConversationId) -> ServiceResult<Conversation> {
        let response = self
            .http_client
            .get(self.conversation_url(id))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_conversation(&self, id: ConversationId) -> ServiceResult<()> {
        let response = self
            .http_client
            .delete(self.conversation_url(id))
            .send()
            .await?;
        // Body is {"ok": true}; only the status matters
        Self::check_status(response).await?;
        Ok(())
    }

    async fn list_messages(&self, id: ConversationId) -> ServiceResult<Vec<MessageRecord>> {
        let response = self.http_client.get(self.messages_url(id)).send().await?;
        Self::decode(response).await
    }

    async fn post_message(
        &self,
        id: ConversationId,
        message: &NewMessage,
    ) -> ServiceResult<SendMessageResponse> {
        let response = self
            .http_client
            .post(self.messages_url(id))
            .json(message)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .get(self.conversations_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_creation() {
        let service = HttpConversationService::new("http://localhost:8100").unwrap();
        assert_eq!(service.base_url(), "http://localhost:8100");
        assert_eq!(service.name(), "HTTP");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let service = HttpConversationService::new("http://example.com:9000/").unwrap();
        assert_eq!(
            service.conversations_url(),
            "http://example.com:9000/conversations/"
        );
    }

    #[test]
    fn test_endpoint_urls() {
        let service = HttpConversationService::new("http://localhost:8100").unwrap();
        let id = ConversationId(5);
        assert_eq!(
            service.conversation_url(id),
            "http://localhost:8100/conversations/5"
        );
        assert_eq!(
            service.messages_url(id),
            "http://localhost:8100/conversations/5/messages"
        );
    }

    #[test]
    fn test_from_config() {
        let mut config = ClientConfig::default();
        config.base_url = "http://chat.internal:8080".to_string();
        config.request_timeout = Some(Duration::from_secs(30));

        let service = HttpConversationService::from_config(&config).unwrap();
        assert_eq!(service.base_url(), "http://chat.internal:8080");
    }
}
