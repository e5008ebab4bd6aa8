//! Chatdeck TUI - Terminal interface for chatdeck
//!
//! A full-screen terminal surface over [`chatdeck_core::ChatViewModel`]:
//! conversation list on the left, the active conversation on the right,
//! an input box and a status bar below.
//!
//! # Architecture
//!
//! - **App**: Event loop, key handling, layout
//! - **Display**: Message/sidebar text formatting
//! - **Widgets**: Scrollable message pane
//! - **Theme**: Color palette

pub mod app;
pub mod display;
pub mod theme;
pub mod widgets;

pub use app::{App, Focus};
