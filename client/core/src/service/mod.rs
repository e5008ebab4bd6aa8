//! Conversation Service Integration
//!
//! Access to the backend that stores conversations and produces assistant
//! replies, behind a trait so the view-model can be driven by a real HTTP
//! client or by a test double.
//!
//! # Usage
//!
//! ```ignore
//! use chatdeck_core::service::{ConversationService, HttpConversationService};
//!
//! let service = HttpConversationService::new("http://localhost:8100")?;
//! let conversations = service.list_conversations().await?;
//! ```

mod http;
mod traits;

pub use http::HttpConversationService;
pub use traits::{ConversationService, ServiceError, ServiceResult};
