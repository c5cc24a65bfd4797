//! Conversation state: the append-only timeline plus session flags
//!
//! [`ConversationState`] owns the message timeline, the in-flight `loading`
//! gate, and the context panel. The timeline only grows; batches are
//! validated up front and appended in one step, so a reader never sees half
//! of a batch.

use super::ids::{Clock, IdAllocator};
use super::message::{Message, MessageId};
use crate::error::{Result, RoundtableError};
use crate::transport::ContextSnapshot;

/// What the context panel currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ContextView {
    /// Last successfully fetched snapshot
    Snapshot(ContextSnapshot),
    /// Marker shown in place of the dump after a failed fetch
    Unavailable(String),
}

/// Context panel state, independent of the timeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextPanel {
    visible: bool,
    view: Option<ContextView>,
}

impl ContextPanel {
    /// Whether the panel is open
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last fetched content, if any fetch has completed
    pub fn view(&self) -> Option<&ContextView> {
        self.view.as_ref()
    }
}

/// Session-scoped conversation state
///
/// # Examples
///
/// ```
/// use roundtable::conversation::{ConversationState, Sender, SystemClock};
///
/// let mut state = ConversationState::new();
/// state.append_user_message("hello", &SystemClock);
/// state.append_error("backend unavailable", &SystemClock);
///
/// assert_eq!(state.len(), 2);
/// assert_eq!(state.messages()[1].sender, Sender::System);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    ids: IdAllocator,
    loading: bool,
    context: ContextPanel,
}

impl ConversationState {
    /// Empty state for a new session
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline in insertion order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of timeline messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True before anything has been appended
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Allocator that batches for [`append_batch`](Self::append_batch) must draw from
    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    /// Append one user message stamped with the current time
    pub fn append_user_message(&mut self, content: &str, clock: &dyn Clock) -> MessageId {
        let id = self.ids.allocate();
        self.messages.push(Message::user(id, content, clock.now()));
        id
    }

    /// Append one system notice, e.g. after a failed send
    pub fn append_error(&mut self, text: &str, clock: &dyn Clock) -> MessageId {
        let id = self.ids.allocate();
        self.messages.push(Message::system(id, text, clock.now()));
        id
    }

    /// Append an ordered batch atomically.
    ///
    /// Ids must be strictly increasing, newer than the current tail, and
    /// issued by this state's allocator. A violating batch is rejected
    /// whole and the timeline is left untouched.
    ///
    /// # Returns
    ///
    /// Number of messages appended
    ///
    /// # Errors
    ///
    /// Returns `RoundtableError::OutOfOrderBatch` when the ordering check fails
    pub fn append_batch(&mut self, batch: Vec<Message>) -> Result<usize> {
        let mut previous = self.messages.last().map(|m| m.id);
        let issued = self.ids.last();

        for message in &batch {
            if previous.map_or(false, |prev| message.id <= prev) {
                return Err(RoundtableError::OutOfOrderBatch(format!(
                    "message {} does not follow {}",
                    message.id,
                    previous.map(|p| p.to_string()).unwrap_or_default()
                ))
                .into());
            }
            if issued.map_or(true, |last| message.id > last) {
                return Err(RoundtableError::OutOfOrderBatch(format!(
                    "message {} was not issued by this conversation",
                    message.id
                ))
                .into());
            }
            previous = Some(message.id);
        }

        let appended = batch.len();
        self.messages.extend(batch);
        Ok(appended)
    }

    /// Whether a send is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Open or close the send gate
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Context panel state
    pub fn context(&self) -> &ContextPanel {
        &self.context
    }

    /// Show or hide the context panel
    pub fn set_context_visible(&mut self, visible: bool) {
        self.context.visible = visible;
    }

    /// Replace the panel content wholesale
    pub fn set_context_snapshot(&mut self, view: ContextView) {
        self.context.view = Some(view);
    }
}
