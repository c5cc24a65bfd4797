//! Chat session: send admission, reply delivery, and context fetches
//!
//! [`ChatSession`] ties a [`Backend`] to a [`ConversationState`]. A send is
//! split into [`begin_send`](ChatSession::begin_send), which appends the
//! user's message and closes the `loading` gate, and
//! [`complete_send`](ChatSession::complete_send), which appends the reply
//! batch (or one failure notice) and reopens the gate. While the gate is
//! closed further sends are refused, never queued.
//!
//! Send and context-fetch failures are logged and absorbed here; no session
//! operation returns them as errors.

use std::sync::Arc;

use crate::conversation::{normalize, Clock, ContextView, ConversationState, MessageId, SystemClock};
use crate::error::Result;
use crate::transport::{
    Backend, ChatResult, DiscussionResult, DiscussionStatus, MAX_DISCUSSION_ROUNDS,
};

/// Timeline notice appended when a send fails
pub const SEND_FAILURE_NOTICE: &str =
    "Something went wrong while getting the agents' replies. Please try again later.";

/// Marker shown in the context panel when a fetch fails
pub const CONTEXT_FETCH_FAILURE: &str = "Failed to fetch context";

/// Why a send was not started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejected {
    /// Input was empty or whitespace only
    EmptyInput,
    /// Another send is still in flight
    Busy,
    /// Discussion round count outside `1..=MAX_DISCUSSION_ROUNDS`
    RoundsOutOfRange(u32),
}

impl std::fmt::Display for SendRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("input is empty"),
            Self::Busy => f.write_str("still waiting for the previous reply"),
            Self::RoundsOutOfRange(rounds) => write!(
                f,
                "discussion rounds must be between 1 and {}, got {}",
                MAX_DISCUSSION_ROUNDS, rounds
            ),
        }
    }
}

/// Result of a completed send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was sent and the timeline is unchanged
    Rejected(SendRejected),
    /// Replies were appended
    Delivered {
        /// Messages appended after the user's message
        appended: usize,
    },
    /// The backend call failed and a notice was appended
    Failed,
}

/// Result of a discussion request
#[derive(Debug, Clone, PartialEq)]
pub enum DiscussionOutcome {
    /// Nothing was sent and the timeline is unchanged
    Rejected(SendRejected),
    /// The payload carried replies, which were appended
    Delivered {
        /// Messages appended after the topic message
        appended: usize,
    },
    /// The payload had no recognisable replies; it is returned as-is
    Opaque(DiscussionResult),
    /// The backend call failed and a notice was appended
    Failed,
}

/// Ticket for a send that has been admitted but not yet completed
#[derive(Debug)]
pub struct PendingSend {
    content: String,
    user_message: MessageId,
}

impl PendingSend {
    /// Text to post to the backend
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Id of the user message appended on admission
    pub fn user_message(&self) -> MessageId {
        self.user_message
    }
}

/// One interactive session against one backend
pub struct ChatSession {
    backend: Arc<dyn Backend>,
    clock: Box<dyn Clock>,
    state: ConversationState,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("backend", &self.backend)
            .field("state", &self.state)
            .finish()
    }
}

impl ChatSession {
    /// Session using the wall clock
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_clock(backend, Box::new(SystemClock))
    }

    /// Session using a caller-supplied clock
    pub fn with_clock(backend: Arc<dyn Backend>, clock: Box<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            state: ConversationState::new(),
        }
    }

    /// Read-only view for rendering
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Admit a send: append the user message and close the gate.
    ///
    /// # Errors
    ///
    /// Returns `SendRejected::EmptyInput` for blank input and
    /// `SendRejected::Busy` while another send is in flight; in both cases
    /// nothing is mutated.
    pub fn begin_send(&mut self, input: &str) -> std::result::Result<PendingSend, SendRejected> {
        if input.trim().is_empty() {
            return Err(SendRejected::EmptyInput);
        }
        if self.state.is_loading() {
            tracing::debug!("Send ignored while another send is in flight");
            return Err(SendRejected::Busy);
        }

        let user_message = self.state.append_user_message(input, self.clock.as_ref());
        self.state.set_loading(true);

        Ok(PendingSend {
            content: input.to_string(),
            user_message,
        })
    }

    /// Deliver the backend's answer for an admitted send and reopen the gate
    pub fn complete_send(&mut self, pending: PendingSend, result: Result<ChatResult>) -> SendOutcome {
        let outcome = match result.and_then(|reply| self.append_reply(reply)) {
            Ok(appended) => {
                tracing::debug!(
                    "Delivered {} messages for message {}",
                    appended,
                    pending.user_message
                );
                SendOutcome::Delivered { appended }
            }
            Err(e) => {
                tracing::error!("Failed to get agent replies: {:#}", e);
                self.state.append_error(SEND_FAILURE_NOTICE, self.clock.as_ref());
                SendOutcome::Failed
            }
        };

        self.state.set_loading(false);
        outcome
    }

    fn append_reply(&mut self, reply: ChatResult) -> Result<usize> {
        let batch = normalize(reply, self.clock.as_ref(), self.state.ids_mut());
        self.state.append_batch(batch)
    }

    /// Send `input` and wait for the replies
    pub async fn send(&mut self, input: &str) -> SendOutcome {
        let pending = match self.begin_send(input) {
            Ok(pending) => pending,
            Err(rejected) => return SendOutcome::Rejected(rejected),
        };

        let result = self.backend.send_chat(pending.content()).await;
        self.complete_send(pending, result)
    }

    /// Ask the agents to discuss `topic`, going through the same send gate
    pub async fn start_discussion(&mut self, topic: &str, max_rounds: u32) -> DiscussionOutcome {
        if !(1..=MAX_DISCUSSION_ROUNDS).contains(&max_rounds) {
            return DiscussionOutcome::Rejected(SendRejected::RoundsOutOfRange(max_rounds));
        }

        let pending = match self.begin_send(topic) {
            Ok(pending) => pending,
            Err(rejected) => return DiscussionOutcome::Rejected(rejected),
        };

        let result = self
            .backend
            .start_discussion(pending.content(), max_rounds)
            .await;

        match result {
            Ok(payload) => match payload.as_chat_result() {
                Some(reply) => match self.complete_send(pending, Ok(reply)) {
                    SendOutcome::Delivered { appended } => DiscussionOutcome::Delivered { appended },
                    _ => DiscussionOutcome::Failed,
                },
                None => {
                    tracing::debug!("Discussion payload has no replies to append");
                    self.state.set_loading(false);
                    DiscussionOutcome::Opaque(payload)
                }
            },
            Err(e) => {
                self.complete_send(pending, Err(e));
                DiscussionOutcome::Failed
            }
        }
    }

    /// Query the backend's discussion status
    pub async fn discussion_status(&self) -> Result<DiscussionStatus> {
        self.backend.discussion_status().await
    }

    /// Flip the context panel; fetch a fresh snapshot when it opens.
    ///
    /// # Returns
    ///
    /// New visibility
    pub async fn toggle_context(&mut self) -> bool {
        let visible = !self.state.context().is_visible();
        self.state.set_context_visible(visible);
        if visible {
            self.refresh_context().await;
        }
        visible
    }

    /// Fetch the context snapshot and replace the panel content
    pub async fn refresh_context(&mut self) {
        let view = match self.backend.fetch_context().await {
            Ok(snapshot) => ContextView::Snapshot(snapshot),
            Err(e) => {
                tracing::error!("Failed to fetch context: {:#}", e);
                ContextView::Unavailable(CONTEXT_FETCH_FAILURE.to_string())
            }
        };
        self.state.set_context_snapshot(view);
    }
}
