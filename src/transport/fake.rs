//! In-process scripted backend for tests
//!
//! [`FakeBackend`] replays queued results per operation and records every
//! request it receives, so session logic can be exercised without a
//! network. An operation whose queue is empty fails with a transport error.
//!
//! # Example
//!
//! ```
//! use roundtable::transport::{Backend, ChatResult, FakeBackend, FlatReply};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let backend = FakeBackend::new();
//! backend.push_chat(Ok(ChatResult::Flat(vec![FlatReply {
//!     agent_name: "Advisor".to_string(),
//!     content: "hello".to_string(),
//! }])));
//!
//! let result = backend.send_chat("hi").await.unwrap();
//! assert_eq!(result.reply_count(), 1);
//! assert_eq!(backend.sent_chats(), vec!["hi".to_string()]);
//!
//! // Nothing queued any more
//! assert!(backend.send_chat("again").await.is_err());
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, RoundtableError};
use crate::transport::{Backend, ChatResult, ContextSnapshot, DiscussionResult, DiscussionStatus};

/// Scripted [`Backend`] implementation
#[derive(Debug, Default)]
pub struct FakeBackend {
    chat: Mutex<VecDeque<Result<ChatResult>>>,
    context: Mutex<VecDeque<Result<ContextSnapshot>>>,
    discussion: Mutex<VecDeque<Result<DiscussionResult>>>,
    status: Mutex<VecDeque<Result<DiscussionStatus>>>,
    sent_chats: Mutex<Vec<String>>,
    started_discussions: Mutex<Vec<(String, u32)>>,
    context_fetches: Mutex<usize>,
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T>>>, operation: &str) -> Result<T> {
    queue
        .lock()
        .map_err(|_| RoundtableError::Transport(format!("{} queue poisoned", operation)))?
        .pop_front()
        .unwrap_or_else(|| {
            Err(RoundtableError::Transport(format!("no scripted {} response", operation)).into())
        })
}

fn push<T>(queue: &Mutex<VecDeque<T>>, item: T) {
    if let Ok(mut guard) = queue.lock() {
        guard.push_back(item);
    }
}

fn record<T>(log: &Mutex<Vec<T>>, item: T) {
    if let Ok(mut guard) = log.lock() {
        guard.push(item);
    }
}

fn snapshot<T: Clone>(value: &Mutex<T>) -> T {
    value
        .lock()
        .map(|guard| guard.clone())
        .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
}

impl FakeBackend {
    /// Create a backend with nothing scripted
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next `send_chat` call
    pub fn push_chat(&self, result: Result<ChatResult>) {
        push(&self.chat, result);
    }

    /// Queue the result of the next `fetch_context` call
    pub fn push_context(&self, result: Result<ContextSnapshot>) {
        push(&self.context, result);
    }

    /// Queue the result of the next `start_discussion` call
    pub fn push_discussion(&self, result: Result<DiscussionResult>) {
        push(&self.discussion, result);
    }

    /// Queue the result of the next `discussion_status` call
    pub fn push_status(&self, result: Result<DiscussionStatus>) {
        push(&self.status, result);
    }

    /// Every chat text received, in order
    pub fn sent_chats(&self) -> Vec<String> {
        snapshot(&self.sent_chats)
    }

    /// Every `(topic, max_rounds)` discussion request received, in order
    pub fn started_discussions(&self) -> Vec<(String, u32)> {
        snapshot(&self.started_discussions)
    }

    /// Number of context fetches issued
    pub fn context_fetches(&self) -> usize {
        snapshot(&self.context_fetches)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn send_chat(&self, content: &str) -> Result<ChatResult> {
        record(&self.sent_chats, content.to_string());
        pop(&self.chat, "chat")
    }

    async fn fetch_context(&self) -> Result<ContextSnapshot> {
        if let Ok(mut count) = self.context_fetches.lock() {
            *count += 1;
        }
        pop(&self.context, "context")
    }

    async fn start_discussion(&self, topic: &str, max_rounds: u32) -> Result<DiscussionResult> {
        record(&self.started_discussions, (topic.to_string(), max_rounds));
        pop(&self.discussion, "discussion")
    }

    async fn discussion_status(&self) -> Result<DiscussionStatus> {
        pop(&self.status, "status")
    }
}
