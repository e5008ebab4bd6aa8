//! MessagePane Widget
//!
//! A borderless, bottom-anchored, scrollable view of the conversation.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;

use chatdeck_core::Message;

use crate::display::{message_lines, placeholder_style};
use crate::theme::FADE_GRAY;

/// Scroll state for a message pane
#[derive(Debug, Default)]
pub struct MessagePaneState {
    /// Lines scrolled up from the bottom (0 = latest)
    pub scroll_offset: usize,
    /// Wrapped lines in the last render
    pub total_lines: usize,
    /// Visible height in the last render
    pub viewport: usize,
}

impl MessagePaneState {
    /// Scroll towards older messages
    pub fn scroll_up(&mut self, lines: usize) {
        let max_scroll = self.total_lines.saturating_sub(self.viewport);
        self.scroll_offset = (self.scroll_offset + lines).min(max_scroll);
    }

    /// Scroll towards newer messages
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Jump back to the latest message
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Half the visible height, at least one line
    #[must_use]
    pub fn page(&self) -> usize {
        (self.viewport / 2).max(1)
    }
}

/// Messages rendered as prefixed, wrapped lines
pub struct MessagePane<'a> {
    messages: &'a [Message],
    placeholder: &'a str,
}

impl<'a> MessagePane<'a> {
    /// Render these messages
    #[must_use]
    pub fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            placeholder: "",
        }
    }

    /// Text shown when there are no messages
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl StatefulWidget for MessagePane<'_> {
    type State = MessagePaneState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let height = area.height as usize;
        state.viewport = height;

        if self.messages.is_empty() {
            state.total_lines = 0;
            state.scroll_offset = 0;
            if height > 0 {
                buf.set_stringn(
                    area.x,
                    area.y,
                    self.placeholder,
                    area.width as usize,
                    placeholder_style(),
                );
            }
            return;
        }

        let lines = message_lines(self.messages, area.width as usize);
        state.total_lines = lines.len();

        // Clamp scroll
        let max_scroll = state.total_lines.saturating_sub(height);
        state.scroll_offset = state.scroll_offset.min(max_scroll);

        let visible_end = state.total_lines.saturating_sub(state.scroll_offset);
        let visible_start = visible_end.saturating_sub(height);
        let has_content_above = visible_start > 0;
        let has_content_below = state.scroll_offset > 0;

        for (i, (line, style)) in lines[visible_start..visible_end].iter().enumerate() {
            // Fade the edge rows when more content is hidden past them
            let faded = (has_content_above && i == 0)
                || (has_content_below && i + 1 == visible_end - visible_start);
            let style = if faded {
                Style::default().fg(FADE_GRAY)
            } else {
                *style
            };

            #[allow(clippy::cast_possible_truncation)]
            let y = area.y + i as u16;
            buf.set_stringn(area.x, y, line, area.width as usize, style);
        }
    }
}
