//! Theme and Colors
//!
//! The chatdeck palette. Kept small: one accent per speaker plus the
//! chrome colors for focus, selection, and service status.

use ratatui::style::Color;

// ============================================================================
// Speakers
// ============================================================================

/// User messages and the input box
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// Assistant messages
pub const ASSISTANT_MAGENTA: Color = Color::Magenta;

// ============================================================================
// Chrome
// ============================================================================

/// Focused pane border/title
pub const FOCUS_ACCENT: Color = Color::Rgb(150, 180, 255);

/// Highlighted sidebar row background
pub const SELECTION_BG: Color = Color::Rgb(50, 55, 75);

/// Active conversation marker
pub const ACTIVE_YELLOW: Color = Color::Rgb(255, 223, 128);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Faded lines at the edges of a scrolled pane
pub const FADE_GRAY: Color = Color::Rgb(80, 80, 80);

// ============================================================================
// Service Status
// ============================================================================

/// Service unreachable
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Service reachable
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);
