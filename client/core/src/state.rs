//! Session State
//!
//! The single state container behind the chat view-model. Surfaces get a
//! shared reference and read from it; every mutation goes through the
//! `pub(crate)` methods below, which only the view-model calls.

use crate::models::{Conversation, ConversationId, Message};

/// Where the active conversation is in its message-loading lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionPhase {
    /// No conversation is active (new, unsaved chat)
    #[default]
    Unselected,
    /// A message-list request for this conversation is in flight
    Selecting(ConversationId),
    /// Messages for this conversation were loaded (or it was just created)
    Loaded(ConversationId),
    /// Loading messages failed; whatever was displayed before is still shown
    ///
    /// This is the "Unselected (stale-empty)" state: the id stays active but
    /// the messages are not known to belong to it.
    Failed(ConversationId),
}

impl SelectionPhase {
    /// The conversation this phase refers to, if any
    #[must_use]
    pub fn conversation_id(&self) -> Option<ConversationId> {
        match *self {
            Self::Unselected => None,
            Self::Selecting(id) | Self::Loaded(id) | Self::Failed(id) => Some(id),
        }
    }
}

/// Everything a surface needs to render a chat session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    conversations: Vec<Conversation>,
    phase: SelectionPhase,
    messages: Vec<Message>,
    input: String,
}

impl SessionState {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Conversations, most recently created first
    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// The active conversation id (`None` = new chat)
    #[must_use]
    pub fn active_id(&self) -> Option<ConversationId> {
        self.phase.conversation_id()
    }

    /// The active conversation, if it is in the list
    #[must_use]
    pub fn active_conversation(&self) -> Option<&Conversation> {
        let id = self.active_id()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Selection lifecycle of the active conversation
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Messages in display order
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Current input buffer
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    // ------------------------------------------------------------------
    // Mutators (view-model only)
    // ------------------------------------------------------------------

    pub(crate) fn replace_conversations(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations;
    }

    /// Clear the active conversation and its messages
    pub(crate) fn start_new_chat(&mut self) {
        self.phase = SelectionPhase::Unselected;
        self.messages.clear();
    }

    pub(crate) fn begin_selecting(&mut self, id: ConversationId) {
        self.phase = SelectionPhase::Selecting(id);
    }

    /// Replace the displayed messages with a loaded list.
    ///
    /// The replacement happens even if `id` is no longer active; the phase
    /// only advances when it still refers to `id`.
    pub(crate) fn finish_loading(&mut self, id: ConversationId, messages: Vec<Message>) {
        self.messages = messages;
        if self.phase.conversation_id() == Some(id) {
            self.phase = SelectionPhase::Loaded(id);
        }
    }

    pub(crate) fn fail_loading(&mut self, id: ConversationId) {
        if self.phase == SelectionPhase::Selecting(id) {
            self.phase = SelectionPhase::Failed(id);
        }
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    /// Take the trimmed input and clear the buffer.
    ///
    /// A blank buffer is left untouched and yields `None`.
    pub(crate) fn take_trimmed_input(&mut self) -> Option<String> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let content = trimmed.to_string();
        self.input.clear();
        Some(content)
    }

    /// Prepend a freshly created conversation and make it active
    pub(crate) fn adopt_created(&mut self, conversation: Conversation) {
        self.phase = SelectionPhase::Loaded(conversation.id);
        self.conversations.insert(0, conversation);
    }

    /// Drop a deleted conversation; deleting the active one starts a new chat
    pub(crate) fn remove_conversation(&mut self, id: ConversationId) {
        self.conversations.retain(|c| c.id != id);
        if self.active_id() == Some(id) {
            self.start_new_chat();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageRole;
    use pretty_assertions::assert_eq;

    fn msg(content: &str) -> Message {
        Message::new(MessageRole::User, content)
    }

    #[test]
    fn test_new_session_is_empty() {
        let state = SessionState::new();
        assert!(state.conversations().is_empty());
        assert_eq!(state.active_id(), None);
        assert_eq!(state.phase(), SelectionPhase::Unselected);
        assert!(state.messages().is_empty());
        assert_eq!(state.input(), "");
    }

    #[test]
    fn test_take_trimmed_input() {
        let mut state = SessionState::new();
        state.set_input("  hello  ".to_string());

        assert_eq!(state.take_trimmed_input().as_deref(), Some("hello"));
        assert_eq!(state.input(), "");
    }

    #[test]
    fn test_blank_input_left_alone() {
        let mut state = SessionState::new();
        state.set_input(" \t\n".to_string());

        assert_eq!(state.take_trimmed_input(), None);
        assert_eq!(state.input(), " \t\n");
    }

    #[test]
    fn test_loading_advances_matching_phase() {
        let mut state = SessionState::new();
        state.begin_selecting(ConversationId(1));
        assert_eq!(state.active_id(), Some(ConversationId(1)));

        state.finish_loading(ConversationId(1), vec![msg("a")]);
        assert_eq!(state.phase(), SelectionPhase::Loaded(ConversationId(1)));
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn test_stale_load_replaces_messages_but_not_phase() {
        let mut state = SessionState::new();
        state.begin_selecting(ConversationId(2));

        state.finish_loading(ConversationId(1), vec![msg("from one")]);

        assert_eq!(state.phase(), SelectionPhase::Selecting(ConversationId(2)));
        assert_eq!(state.messages(), &[msg("from one")]);
    }

    #[test]
    fn test_failed_load_keeps_messages() {
        let mut state = SessionState::new();
        state.push_message(msg("kept"));
        state.begin_selecting(ConversationId(3));

        state.fail_loading(ConversationId(3));

        assert_eq!(state.phase(), SelectionPhase::Failed(ConversationId(3)));
        assert_eq!(state.active_id(), Some(ConversationId(3)));
        assert_eq!(state.messages(), &[msg("kept")]);
    }

    #[test]
    fn test_adopt_created_prepends() {
        let mut state = SessionState::new();
        state.replace_conversations(vec![Conversation::new(1)]);

        state.adopt_created(Conversation::new(2));

        let ids: Vec<_> = state.conversations().iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(state.active_id(), Some(ConversationId(2)));
        assert_eq!(
            state.active_conversation().map(Conversation::display_title),
            Some("Chat 2".to_string())
        );
    }

    #[test]
    fn test_remove_active_conversation_starts_new_chat() {
        let mut state = SessionState::new();
        state.replace_conversations(vec![Conversation::new(1), Conversation::new(2)]);
        state.begin_selecting(ConversationId(2));
        state.finish_loading(ConversationId(2), vec![msg("x")]);

        state.remove_conversation(ConversationId(2));

        assert_eq!(state.conversations(), &[Conversation::new(1)]);
        assert_eq!(state.active_id(), None);
        assert!(state.messages().is_empty());
    }

    #[test]
    fn test_remove_inactive_conversation_keeps_selection() {
        let mut state = SessionState::new();
        state.replace_conversations(vec![Conversation::new(1), Conversation::new(2)]);
        state.begin_selecting(ConversationId(1));
        state.finish_loading(ConversationId(1), vec![msg("x")]);

        state.remove_conversation(ConversationId(2));

        assert_eq!(state.active_id(), Some(ConversationId(1)));
        assert_eq!(state.messages(), &[msg("x")]);
    }
}
