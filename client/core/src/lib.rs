//! Chatdeck Core - Headless Chat View-Model
//!
//! This crate holds everything a chat client needs except the pixels: the
//! data model, the session state, the view-model that keeps that state in
//! sync with a conversation service, and the service client itself. It has
//! no UI dependencies, so the same view-model can drive the terminal surface
//! or run headless under test.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Surface (TUI)                       │
//! │        key presses ──► actions      state() ──► render   │
//! └───────────────┬──────────────────────────▲───────────────┘
//!                 │                          │
//! ┌───────────────▼──────────────────────────┴───────────────┐
//! │                     ChatViewModel                        │
//! │  ┌──────────────┐   apply()   ┌────────────────────────┐ │
//! │  │ SessionState │ ◄────────── │ StateUpdate channel    │ │
//! │  └──────────────┘             └───────────▲────────────┘ │
//! │                                           │              │
//! │                spawned tasks ─────────────┘              │
//! └────────────────────────┬─────────────────────────────────┘
//!                          │
//! ┌────────────────────────▼─────────────────────────────────┐
//! │            ConversationService (HTTP / mock)             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ChatViewModel`]: actions plus update handling
//! - [`SessionState`]: conversations, active id, messages, input
//! - [`ConversationService`]: the backend seam
//! - [`HttpConversationService`]: REST implementation over `reqwest`
//! - [`ClientConfig`]: layered configuration (CLI > env > file > defaults)
//!
//! # Quick Start
//!
//! ```ignore
//! use chatdeck_core::{ChatViewModel, HttpConversationService};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let service = HttpConversationService::new("http://localhost:8100").unwrap();
//!     let mut vm = ChatViewModel::new(service);
//!
//!     vm.start();
//!     vm.settle().await;
//!
//!     vm.update_input("hello");
//!     vm.send();
//!     vm.settle().await;
//!
//!     for message in vm.state().messages() {
//!         println!("{}: {}", message.role, message.content);
//!     }
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod models;
pub mod service;
pub mod state;
pub mod updates;
pub mod view_model;

pub use config::{
    default_config_path, load_config, load_config_from_path, ClientConfig, ConfigError,
    ConfigOverrides, ConfigSource, DEFAULT_BASE_URL,
};
pub use models::{
    Conversation, ConversationId, Message, MessageRecord, MessageRole, NewMessage, RenderKey,
    SendMessageResponse,
};
pub use service::{ConversationService, HttpConversationService, ServiceError, ServiceResult};
pub use state::{SelectionPhase, SessionState};
pub use updates::{SendStage, StateUpdate};
pub use view_model::ChatViewModel;
