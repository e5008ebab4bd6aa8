//! Chat View-Model
//!
//! Owns the [`SessionState`] and mediates every interaction with the
//! conversation service.
//!
//! # Threading
//!
//! Actions mutate state synchronously (optimistic updates) and spawn a tokio
//! task for each network call. Tasks never touch the state: they report a
//! [`StateUpdate`] through an unbounded channel, and the owner of the
//! view-model feeds those back in with [`ChatViewModel::poll_updates`] or
//! [`ChatViewModel::next_update`]. [`ChatViewModel::apply`] is therefore the
//! only writer for anything that happens after a request completes.
//!
//! Actions that make requests must be called from within a tokio runtime.
//!
//! # Failure handling
//!
//! Service failures are logged at `warn` and otherwise ignored. There is no
//! rollback of optimistic messages and no retry.
//!
//! Superseded message loads are not cancelled. If two selections race, the
//! response that arrives last decides what is displayed.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::models::{ConversationId, Message, NewMessage};
use crate::service::ConversationService;
use crate::state::SessionState;
use crate::updates::{SendStage, StateUpdate};

/// The chat view-model
pub struct ChatViewModel<S: ConversationService + 'static> {
    service: Arc<S>,
    state: SessionState,
    update_tx: mpsc::UnboundedSender<StateUpdate>,
    update_rx: mpsc::UnboundedReceiver<StateUpdate>,
    /// Spawned tasks that have not reported a terminal update yet
    pending: usize,
    started: bool,
}

impl<S: ConversationService + 'static> ChatViewModel<S> {
    /// Create a view-model over a service
    #[must_use]
    pub fn new(service: S) -> Self {
        Self::with_shared(Arc::new(service))
    }

    /// Create a view-model over a service the caller keeps a handle to
    #[must_use]
    pub fn with_shared(service: Arc<S>) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        Self {
            service,
            state: SessionState::new(),
            update_tx,
            update_rx,
            pending: 0,
            started: false,
        }
    }

    /// The underlying service
    #[must_use]
    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Read-only view of the session
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Number of requests still in flight
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.pending
    }

    /// Whether any request is still in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Initial load. Only the first call does anything.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.load_conversations();
    }

    /// Request the conversation list
    pub fn load_conversations(&mut self) {
        let service = Arc::clone(&self.service);
        self.spawn_request(async move {
            StateUpdate::ConversationsLoaded(service.list_conversations().await)
        });
    }

    /// Make a conversation active, or start a new chat with `None`
    ///
    /// `None` clears the messages immediately and makes no request.
    pub fn select_conversation(&mut self, id: Option<ConversationId>) {
        match id {
            Some(id) => {
                tracing::debug!(conversation_id = %id, "Selecting conversation");
                self.state.begin_selecting(id);
                self.load_messages(id);
            }
            None => self.new_chat(),
        }
    }

    /// Start a new, unsaved chat
    pub fn new_chat(&mut self) {
        self.state.start_new_chat();
    }

    /// Request the messages of a conversation
    ///
    /// On success the result replaces the displayed messages, whichever
    /// conversation is active by then.
    pub fn load_messages(&mut self, id: ConversationId) {
        let service = Arc::clone(&self.service);
        self.spawn_request(async move {
            let result = service
                .list_messages(id)
                .await
                .map(|records| records.into_iter().map(Message::from).collect());
            StateUpdate::MessagesLoaded {
                conversation_id: id,
                result,
            }
        });
    }

    /// Replace the input buffer
    pub fn update_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text.into());
    }

    /// Send the input buffer
    ///
    /// Returns `false` (and changes nothing) when the trimmed input is empty.
    /// Otherwise the user message is appended and the input cleared before
    /// this returns; creating the conversation (for a new chat) and posting
    /// happen in the background.
    pub fn send(&mut self) -> bool {
        let Some(content) = self.state.take_trimmed_input() else {
            return false;
        };

        self.state
            .push_message(Message::optimistic_user(content.clone()));

        let active = self.state.active_id();
        let service = Arc::clone(&self.service);
        let updates = self.update_tx.clone();
        self.pending += 1;
        tokio::spawn(send_pipeline(service, updates, active, content));
        true
    }

    /// Delete a conversation
    ///
    /// The list is only updated once the service confirms.
    pub fn delete_conversation(&mut self, id: ConversationId) {
        let service = Arc::clone(&self.service);
        self.spawn_request(async move {
            StateUpdate::ConversationDeleted {
                conversation_id: id,
                result: service.delete_conversation(id).await,
            }
        });
    }

    // ========================================================================
    // Update handling
    // ========================================================================

    /// Fold a finished request into the session state
    pub fn apply(&mut self, update: StateUpdate) {
        if update.is_terminal() {
            self.pending = self.pending.saturating_sub(1);
        }

        match update {
            StateUpdate::ConversationsLoaded(Ok(conversations)) => {
                tracing::debug!(count = conversations.len(), "Loaded conversations");
                self.state.replace_conversations(conversations);
            }
            StateUpdate::ConversationsLoaded(Err(e)) => {
                tracing::warn!(error = %e, "Failed to load conversations");
            }
            StateUpdate::MessagesLoaded {
                conversation_id,
                result: Ok(messages),
            } => {
                if self.state.active_id() != Some(conversation_id) {
                    tracing::debug!(
                        conversation_id = %conversation_id,
                        "Messages arrived for a conversation that is no longer active"
                    );
                }
                self.state.finish_loading(conversation_id, messages);
            }
            StateUpdate::MessagesLoaded {
                conversation_id,
                result: Err(e),
            } => {
                tracing::warn!(
                    conversation_id = %conversation_id,
                    error = %e,
                    "Failed to load messages"
                );
                self.state.fail_loading(conversation_id);
            }
            StateUpdate::ConversationCreated(conversation) => {
                tracing::info!(conversation_id = %conversation.id, "Created conversation");
                self.state.adopt_created(conversation);
            }
            StateUpdate::ReplyReceived {
                conversation_id,
                reply,
            } => match reply {
                Some(message) => self.state.push_message(message),
                None => {
                    tracing::debug!(conversation_id = %conversation_id, "No assistant reply");
                }
            },
            StateUpdate::SendFailed { stage, error } => {
                tracing::warn!(stage = %stage, error = %error, "Failed to send message");
            }
            StateUpdate::ConversationDeleted {
                conversation_id,
                result: Ok(()),
            } => {
                tracing::info!(conversation_id = %conversation_id, "Deleted conversation");
                self.state.remove_conversation(conversation_id);
            }
            StateUpdate::ConversationDeleted {
                conversation_id,
                result: Err(e),
            } => {
                tracing::warn!(
                    conversation_id = %conversation_id,
                    error = %e,
                    "Failed to delete conversation"
                );
            }
        }
    }

    /// Apply every update that is already waiting. Returns whether any was.
    pub fn poll_updates(&mut self) -> bool {
        let mut applied = false;
        while let Ok(update) = self.update_rx.try_recv() {
            self.apply(update);
            applied = true;
        }
        applied
    }

    /// Wait for the next update without applying it
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` branch.
    pub async fn recv_update(&mut self) -> Option<StateUpdate> {
        self.update_rx.recv().await
    }

    /// Wait for the next update and apply it
    pub async fn next_update(&mut self) -> bool {
        match self.update_rx.recv().await {
            Some(update) => {
                self.apply(update);
                true
            }
            None => false,
        }
    }

    /// Apply updates until no request is in flight
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            if !self.next_update().await {
                break;
            }
        }
    }

    fn spawn_request<F>(&mut self, request: F)
    where
        F: Future<Output = StateUpdate> + Send + 'static,
    {
        self.pending += 1;
        let updates = self.update_tx.clone();
        tokio::spawn(async move {
            // The receiver lives as long as the view-model
            let _ = updates.send(request.await);
        });
    }
}

/// Create the conversation if needed, then post the message
async fn send_pipeline<S: ConversationService>(
    service: Arc<S>,
    updates: mpsc::UnboundedSender<StateUpdate>,
    active: Option<ConversationId>,
    content: String,
) {
    let conversation_id = match active {
        Some(id) => id,
        None => match service.create_conversation().await {
            Ok(conversation) => {
                let id = conversation.id;
                let _ = updates.send(StateUpdate::ConversationCreated(conversation));
                id
            }
            Err(error) => {
                let _ = updates.send(StateUpdate::SendFailed {
                    stage: SendStage::CreateConversation,
                    error,
                });
                return;
            }
        },
    };

    let message = NewMessage::user(content);
    let update = match service.post_message(conversation_id, &message).await {
        Ok(response) => StateUpdate::ReplyReceived {
            conversation_id,
            reply: response.assistant.map(Message::from),
        },
        Err(error) => StateUpdate::SendFailed {
            stage: SendStage::PostMessage,
            error,
        },
    };
    let _ = updates.send(update);
}
