//! Display Formatting
//!
//! Turns view-model data into styled, wrapped text lines. Nothing here
//! touches a terminal, so it is tested directly.

use ratatui::style::{Modifier, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use chatdeck_core::{Conversation, Message, MessageRole};

use crate::theme::{ASSISTANT_MAGENTA, DIM_GRAY, USER_GREEN};

/// A wrapped line ready to draw
pub type StyledLine = (String, Style);

/// Prefix shown before a message of this role
#[must_use]
pub fn role_prefix(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "You: ",
        MessageRole::Assistant => "Assistant: ",
    }
}

/// Text style for a message of this role
#[must_use]
pub fn role_style(role: MessageRole) -> Style {
    match role {
        MessageRole::User => Style::default().fg(USER_GREEN),
        MessageRole::Assistant => Style::default().fg(ASSISTANT_MAGENTA),
    }
}

/// Wrap every message to `width`, with a blank line after each
#[must_use]
pub fn message_lines(messages: &[Message], width: usize) -> Vec<StyledLine> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for message in messages {
        let style = role_style(message.role);
        let text = format!("{}{}", role_prefix(message.role), message.content);
        for paragraph in text.lines() {
            if paragraph.is_empty() {
                lines.push((String::new(), style));
                continue;
            }
            lines.extend(
                textwrap::wrap(paragraph, width)
                    .into_iter()
                    .map(|line| (line.into_owned(), style)),
            );
        }
        lines.push((String::new(), Style::default()));
    }

    lines
}

/// Input buffer as wrapped lines, with a cursor when focused
#[must_use]
pub fn input_lines(input: &str, width: usize, focused: bool) -> Vec<String> {
    let cursor = if focused { "_" } else { "" };
    let text = format!("> {input}{cursor}");
    textwrap::wrap(&text, width.max(1))
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Sidebar label for a conversation
#[must_use]
pub fn conversation_label(conversation: &Conversation, active: bool, width: usize) -> String {
    let marker = if active { "* " } else { "  " };
    truncate(&format!("{marker}{}", conversation.display_title()), width)
}

/// Style for the placeholder shown when there are no messages
#[must_use]
pub fn placeholder_style() -> Style {
    Style::default().fg(DIM_GRAY).add_modifier(Modifier::ITALIC)
}

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prefixes() {
        assert_eq!(role_prefix(MessageRole::User), "You: ");
        assert_eq!(role_prefix(MessageRole::Assistant), "Assistant: ");
    }

    #[test]
    fn test_message_lines_wrap_and_separate() {
        let messages = vec![
            Message::new(MessageRole::User, "hello there friend"),
            Message::new(MessageRole::Assistant, "hi"),
        ];

        let lines: Vec<String> = message_lines(&messages, 12)
            .into_iter()
            .map(|(text, _)| text)
            .collect();

        assert_eq!(
            lines,
            vec!["You: hello", "there friend", "", "Assistant:", "hi", ""]
        );
    }

    #[test]
    fn test_message_lines_keep_paragraphs() {
        let messages = vec![Message::new(MessageRole::Assistant, "one\n\ntwo")];
        let lines: Vec<String> = message_lines(&messages, 40)
            .into_iter()
            .map(|(text, _)| text)
            .collect();
        assert_eq!(lines, vec!["Assistant: one", "", "two", ""]);
    }

    #[test]
    fn test_input_lines_cursor() {
        assert_eq!(input_lines("hi", 20, true), vec!["> hi_"]);
        assert_eq!(input_lines("hi", 20, false), vec!["> hi"]);
    }

    #[test]
    fn test_conversation_label() {
        let conversation = Conversation::new(12);
        assert_eq!(conversation_label(&conversation, false, 20), "  Chat 12");
        assert_eq!(conversation_label(&conversation, true, 20), "* Chat 12");

        let long = Conversation::new(1).with_title("A rather long conversation title");
        assert_eq!(conversation_label(&long, false, 10), "  A rathe…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        assert_eq!(truncate("日本語テキスト", 7), "日本語…");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abc", 0), "");
    }
}
