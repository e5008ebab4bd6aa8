//! Widgets
//!
//! Custom ratatui widgets that the stock set does not cover.

pub mod message_pane;

pub use message_pane::{MessagePane, MessagePaneState};
