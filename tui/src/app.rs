//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize, view-model updates)
//! - Key presses mapped to view-model actions
//! - Rendering of a read-only view of the session
//!
//! All chat behaviour lives in [`ChatViewModel`]. The App only owns what is
//! purely visual: focus, the sidebar cursor, and message scrolling.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::sync::oneshot;

use chatdeck_core::{ChatViewModel, ConversationService};

use crate::display::{conversation_label, input_lines};
use crate::theme::{
    ACTIVE_YELLOW, DIM_GRAY, ERROR_RED, FOCUS_ACCENT, SELECTION_BG, SUCCESS_GREEN, USER_GREEN,
};
use crate::widgets::{MessagePane, MessagePaneState};

/// Input box height (lines, including its top border)
const INPUT_HEIGHT: u16 = 4;

/// Sidebar width (columns, including its right border)
const SIDEBAR_WIDTH: u16 = 28;

/// Shown in an empty message pane
const EMPTY_CHAT_HINT: &str = "New chat. Type a message and press Enter.";

/// Which pane receives key presses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// Conversation list
    Sidebar,
    /// Message input
    Input,
}

impl Focus {
    fn toggled(self) -> Self {
        match self {
            Self::Sidebar => Self::Input,
            Self::Input => Self::Sidebar,
        }
    }
}

/// Main application state
pub struct App<S: ConversationService + 'static> {
    /// Is the app still running?
    running: bool,
    /// Session logic
    vm: ChatViewModel<S>,
    /// Focused pane
    focus: Focus,
    /// Highlighted row in the conversation list
    sidebar_cursor: usize,
    /// Message pane scroll state
    pane: MessagePaneState,
    /// Result of the startup health check (`None` while it runs)
    service_reachable: Option<bool>,
    /// Shown in the status bar
    endpoint: String,
}

impl<S: ConversationService + 'static> App<S> {
    /// Create an app around a view-model
    #[must_use]
    pub fn new(vm: ChatViewModel<S>) -> Self {
        Self {
            running: true,
            vm,
            focus: Focus::Input,
            sidebar_cursor: 0,
            pane: MessagePaneState::default(),
            service_reachable: None,
            endpoint: String::new(),
        }
    }

    /// Label the service endpoint in the status bar
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The view-model
    #[must_use]
    pub fn view_model(&self) -> &ChatViewModel<S> {
        &self.vm
    }

    /// The view-model, mutably
    pub fn view_model_mut(&mut self) -> &mut ChatViewModel<S> {
        &mut self.vm
    }

    /// Whether the event loop should keep going
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Focused pane
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Highlighted sidebar row
    #[must_use]
    pub fn sidebar_cursor(&self) -> usize {
        self.sidebar_cursor
    }

    /// Lines scrolled up from the latest message
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.pane.scroll_offset
    }

    /// Record the health check result
    pub fn set_service_reachable(&mut self, reachable: bool) {
        if !reachable {
            tracing::warn!(endpoint = %self.endpoint, "Conversation service is not reachable");
        }
        self.service_reachable = Some(reachable);
    }

    /// Main event loop
    ///
    /// # Errors
    ///
    /// Returns an error if drawing to the terminal fails.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        let (health_tx, mut health_rx) = oneshot::channel();
        let service = Arc::clone(self.vm.service());
        tokio::spawn(async move {
            let _ = health_tx.send(service.health_check().await);
        });

        self.vm.start();

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    // Only handle Press events (not Release or Repeat)
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Terminal event error");
                    }
                    None => self.running = false,
                },

                // Finished service requests
                Some(update) = self.vm.recv_update() => {
                    self.vm.apply(update);
                }

                result = &mut health_rx, if self.service_reachable.is_none() => {
                    self.set_service_reachable(result.unwrap_or(false));
                }
            }

            // Drain anything else that completed meanwhile
            self.vm.poll_updates();
            self.clamp_cursor();

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if ctrl => self.running = false,

            // Session actions
            KeyCode::Char('n') if ctrl => {
                self.vm.select_conversation(None);
                self.focus = Focus::Input;
                self.pane.scroll_to_bottom();
            }
            KeyCode::Char('r') if ctrl => self.vm.load_conversations(),
            KeyCode::Char('d') if ctrl => {
                if self.focus == Focus::Sidebar {
                    self.delete_highlighted();
                }
            }

            KeyCode::Tab => self.focus = self.focus.toggled(),

            // Conversation scrolling
            KeyCode::PageUp => self.pane.scroll_up(self.pane.page()),
            KeyCode::PageDown => self.pane.scroll_down(self.pane.page()),

            _ => match self.focus {
                Focus::Sidebar => self.handle_sidebar_key(key),
                Focus::Input => self.handle_input_key(key),
            },
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        let count = self.vm.state().conversations().len();
        match key.code {
            KeyCode::Up => self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.sidebar_cursor + 1 < count {
                    self.sidebar_cursor += 1;
                }
            }
            KeyCode::Enter => {
                let highlighted = self
                    .vm
                    .state()
                    .conversations()
                    .get(self.sidebar_cursor)
                    .map(|c| c.id);
                if let Some(id) = highlighted {
                    self.vm.select_conversation(Some(id));
                    self.focus = Focus::Input;
                    self.pane.scroll_to_bottom();
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.vm.send() {
                    self.pane.scroll_to_bottom();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut text = self.vm.state().input().to_string();
                text.push(c);
                self.vm.update_input(text);
            }
            KeyCode::Backspace => {
                let mut text = self.vm.state().input().to_string();
                if text.pop().is_some() {
                    self.vm.update_input(text);
                }
            }
            _ => {}
        }
    }

    fn delete_highlighted(&mut self) {
        let highlighted = self
            .vm
            .state()
            .conversations()
            .get(self.sidebar_cursor)
            .map(|c| c.id);
        if let Some(id) = highlighted {
            self.vm.delete_conversation(id);
        }
    }

    /// Keep the cursor on a real row after the list changes
    fn clamp_cursor(&mut self) {
        let count = self.vm.state().conversations().len();
        self.sidebar_cursor = self.sidebar_cursor.min(count.saturating_sub(1));
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
            .split(rows[0]);

        self.render_sidebar(frame, columns[0]);
        self.render_messages(frame, columns[1]);
        self.render_input(frame, rows[1]);
        self.render_status(frame, rows[2]);
    }

    fn pane_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(FOCUS_ACCENT)
        } else {
            Style::default().fg(DIM_GRAY)
        }
    }

    /// Render conversation list
    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(self.pane_style(Focus::Sidebar))
            .title(Line::styled(" Conversations ", self.pane_style(Focus::Sidebar)));

        let state = self.vm.state();
        let label_width = area.width.saturating_sub(1) as usize;
        let items: Vec<ListItem> = state
            .conversations()
            .iter()
            .map(|conversation| {
                let active = state.active_id() == Some(conversation.id);
                let style = if active {
                    Style::default().fg(ACTIVE_YELLOW)
                } else {
                    Style::default()
                };
                ListItem::new(conversation_label(conversation, active, label_width)).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(SELECTION_BG).add_modifier(Modifier::BOLD));

        let mut list_state = ListState::default();
        if self.focus == Focus::Sidebar && !state.conversations().is_empty() {
            list_state.select(Some(self.sidebar_cursor));
        }
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    /// Render message pane
    fn render_messages(&mut self, frame: &mut Frame, area: Rect) {
        let inner = Rect {
            x: area.x + 1,
            width: area.width.saturating_sub(2),
            ..area
        };
        let pane = MessagePane::new(self.vm.state().messages()).placeholder(EMPTY_CHAT_HINT);
        frame.render_stateful_widget(pane, inner, &mut self.pane);
    }

    /// Render input box
    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(self.pane_style(Focus::Input))
            .title(Line::styled(" Message ", self.pane_style(Focus::Input)));
        let text_height = area.height.saturating_sub(1) as usize;

        let focused = self.focus == Focus::Input;
        let lines = input_lines(self.vm.state().input(), area.width as usize, focused);
        // Keep the end of long input (and the cursor) visible
        let visible: Vec<Line> = lines
            .iter()
            .skip(lines.len().saturating_sub(text_height))
            .map(|line| Line::raw(line.as_str()))
            .collect();

        let style = if focused {
            Style::default().fg(USER_GREEN)
        } else {
            Style::default().fg(DIM_GRAY)
        };
        frame.render_widget(Paragraph::new(visible).style(style).block(block), area);
    }

    /// Render status bar
    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let state = self.vm.state();

        let title = state
            .active_conversation()
            .map_or_else(|| "New chat".to_string(), |c| c.display_title());

        let (service, service_style) = match self.service_reachable {
            None => ("connecting", Style::default().fg(DIM_GRAY)),
            Some(true) => ("online", Style::default().fg(SUCCESS_GREEN)),
            Some(false) => ("offline", Style::default().fg(ERROR_RED)),
        };

        let waiting = if self.vm.is_busy() { " | waiting..." } else { "" };
        let scroll_info = if self.pane.scroll_offset > 0 {
            format!(" [^{} lines]", self.pane.scroll_offset)
        } else {
            String::new()
        };

        let line = Line::from(vec![
            Span::styled(format!(" {title} | "), Style::default().fg(DIM_GRAY)),
            Span::styled(format!("{service} {}", self.endpoint), service_style),
            Span::styled(
                format!(
                    "{waiting}{scroll_info} | Tab focus | ^N new | ^R refresh | ^D delete | Esc quit"
                ),
                Style::default().fg(DIM_GRAY),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
