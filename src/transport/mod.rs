//! Backend transport abstraction and wire types
//!
//! This module defines the [`Backend`] trait that every transport client
//! implements, together with the JSON payload types exchanged with the
//! agent backend. Concrete implementations live in submodules:
//!
//! - [`http::HttpBackend`] -- JSON over HTTP using `reqwest`.
//! - [`fake::FakeBackend`] -- scripted in-process backend for tests.
//!
//! # Response shapes
//!
//! `POST /chat` answers with one of two shapes. Both are decoded into the
//! tagged [`ChatResult`] enum at this boundary so downstream code matches
//! exhaustively instead of probing for optional fields:
//!
//! ```
//! use roundtable::transport::ChatResult;
//!
//! let flat: ChatResult =
//!     serde_json::from_str(r#"[{"agent_name":"A","content":"hi"}]"#).unwrap();
//! assert!(matches!(flat, ChatResult::Flat(_)));
//!
//! let rich: ChatResult = serde_json::from_str(
//!     r#"{"is_discussion":true,"responses":[{"agent_name":"A","content":"x","round":1}]}"#,
//! )
//! .unwrap();
//! assert!(matches!(rich, ChatResult::Rich(_)));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

pub mod fake;
pub mod http;

pub use fake::FakeBackend;
pub use http::HttpBackend;

/// Rounds requested when a discussion is started without an explicit count
pub const DEFAULT_MAX_ROUNDS: u32 = 3;

/// Largest round count a discussion may request
pub const MAX_DISCUSSION_ROUNDS: u32 = 20;

/// Abstraction over the agent backend.
///
/// Every method either returns the decoded payload or an error
/// (network failure, non-success status, or undecodable body). Callers in
/// the session layer absorb these errors; nothing is retried here.
#[async_trait::async_trait]
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Post the user's text to `/chat` and return the agents' replies.
    async fn send_chat(&self, content: &str) -> Result<ChatResult>;

    /// Fetch the shared and per-agent context dump from `/context`.
    async fn fetch_context(&self) -> Result<ContextSnapshot>;

    /// Ask the backend to run a discussion on `topic` via `/discussion`.
    async fn start_discussion(&self, topic: &str, max_rounds: u32) -> Result<DiscussionResult>;

    /// Query `/discussion/status`.
    async fn discussion_status(&self) -> Result<DiscussionStatus>;
}

/// Request body for `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// User text
    pub content: String,
}

/// Request body for `POST /discussion`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionRequest {
    /// Discussion topic
    pub topic: String,
    /// Upper bound on discussion rounds
    pub max_rounds: u32,
}

/// One agent reply in the flat response shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatReply {
    /// Display name of the replying agent
    pub agent_name: String,
    /// Reply text
    pub content: String,
}

/// One agent reply in the rich response shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionReply {
    /// Display name of the replying agent
    pub agent_name: String,
    /// Reply text
    pub content: String,
    /// Discussion round this reply belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    /// Whether this reply closes the discussion with a summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_summary: Option<bool>,
}

/// Envelope of the rich response shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEnvelope {
    /// Whether the replies form a multi-round discussion
    #[serde(default)]
    pub is_discussion: bool,
    /// Replies in backend order
    pub responses: Vec<DiscussionReply>,
}

/// Decoded `/chat` response.
///
/// Declared `Rich` first so that an object carrying `responses` is never
/// mistaken for anything else; a bare JSON array is `Flat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatResult {
    /// `{ is_discussion, responses: [...] }`
    Rich(ChatEnvelope),
    /// `[{ agent_name, content }, ...]`
    Flat(Vec<FlatReply>),
}

impl ChatResult {
    /// Number of agent replies carried by this result
    pub fn reply_count(&self) -> usize {
        match self {
            Self::Rich(envelope) => envelope.responses.len(),
            Self::Flat(replies) => replies.len(),
        }
    }
}

/// Private context of a single agent
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentContext {
    /// Opaque private memory dump
    #[serde(default)]
    pub private_context: serde_json::Value,
    /// Number of entries in the private memory
    #[serde(default, deserialize_with = "null_as_default")]
    pub private_context_length: usize,
}

/// Point-in-time dump of shared and per-agent memory from `/context`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContextSnapshot {
    /// Opaque shared memory dump
    #[serde(default)]
    pub global_context: serde_json::Value,
    /// Number of entries in the shared memory
    #[serde(default, deserialize_with = "null_as_default")]
    pub global_context_length: usize,
    /// Private memory keyed by agent name
    #[serde(default, deserialize_with = "null_as_default")]
    pub agents: BTreeMap<String, AgentContext>,
}

// The backend sends `null` for counters and maps it has nothing to report on
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Opaque `/discussion` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscussionResult(pub serde_json::Value);

impl DiscussionResult {
    /// Interpret the payload as agent replies, when it has a recognisable shape.
    ///
    /// Replies from this endpoint are a discussion unless the payload says
    /// otherwise: a bare array of replies, or an envelope without an
    /// `is_discussion` flag, is treated as one.
    pub fn as_chat_result(&self) -> Option<ChatResult> {
        if let Ok(mut envelope) = serde_json::from_value::<ChatEnvelope>(self.0.clone()) {
            if self.0.get("is_discussion").is_none() {
                envelope.is_discussion = true;
            }
            return Some(ChatResult::Rich(envelope));
        }

        serde_json::from_value::<Vec<DiscussionReply>>(self.0.clone())
            .ok()
            .map(|responses| {
                ChatResult::Rich(ChatEnvelope {
                    is_discussion: true,
                    responses,
                })
            })
    }
}

/// Opaque `/discussion/status` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscussionStatus(pub serde_json::Value);
