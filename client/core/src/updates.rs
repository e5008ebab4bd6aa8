//! State Updates
//!
//! Messages sent by completed service tasks back to the view-model. Each
//! spawned request reports exactly once, except the send pipeline which may
//! report [`StateUpdate::ConversationCreated`] before its final update.

use std::fmt;

use crate::models::{Conversation, ConversationId, Message};
use crate::service::{ServiceError, ServiceResult};

/// Which step of a send failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendStage {
    /// Creating the conversation for an unsaved chat
    CreateConversation,
    /// Posting the message itself
    PostMessage,
}

impl fmt::Display for SendStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateConversation => write!(f, "create conversation"),
            Self::PostMessage => write!(f, "post message"),
        }
    }
}

/// Result of a background service call
#[derive(Debug)]
pub enum StateUpdate {
    /// The conversation list request finished
    ConversationsLoaded(ServiceResult<Vec<Conversation>>),

    /// A message list request finished
    MessagesLoaded {
        /// Conversation the request was made for
        conversation_id: ConversationId,
        /// Loaded messages or the failure
        result: ServiceResult<Vec<Message>>,
    },

    /// A send created a conversation for an unsaved chat
    ConversationCreated(Conversation),

    /// A message was posted
    ReplyReceived {
        /// Conversation the message was posted to
        conversation_id: ConversationId,
        /// The assistant reply, if the service produced one
        reply: Option<Message>,
    },

    /// A send was abandoned
    SendFailed {
        /// The step that failed
        stage: SendStage,
        /// Underlying error
        error: ServiceError,
    },

    /// A delete request finished
    ConversationDeleted {
        /// Conversation that was targeted
        conversation_id: ConversationId,
        /// Outcome
        result: ServiceResult<()>,
    },
}

impl StateUpdate {
    /// Whether this update ends the task that sent it
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::ConversationCreated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_is_not_terminal() {
        assert!(!StateUpdate::ConversationCreated(Conversation::new(1)).is_terminal());
        assert!(StateUpdate::ReplyReceived {
            conversation_id: ConversationId(1),
            reply: None,
        }
        .is_terminal());
        assert!(StateUpdate::ConversationsLoaded(Ok(Vec::new())).is_terminal());
    }

    #[test]
    fn test_send_stage_display() {
        assert_eq!(
            SendStage::CreateConversation.to_string(),
            "create conversation"
        );
        assert_eq!(SendStage::PostMessage.to_string(), "post message");
    }
}
