//! Timeline message types
//!
//! A [`Message`] is one immutable entry in the conversation timeline. It is
//! serialised with camelCase keys so `--json` output matches the shape
//! consumers of the original chat UI expect.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Unique, strictly increasing identifier of a timeline message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a message author
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person at the keyboard
    User,
    /// Client-generated notices (discussion start, send failures)
    System,
    /// A backend agent, by display name
    Agent(String),
}

impl Sender {
    /// Literal identity string: `"user"`, `"system"`, or the agent's name
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::System => "system",
            Self::Agent(name) => name,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Sender {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single timeline entry
///
/// The discussion fields are `None` for plain replies and user input; only
/// messages decoded from the rich response shape carry them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Render key and ordering witness
    pub id: MessageId,
    /// Author identity
    pub sender: Sender,
    /// Display text
    pub content: String,
    /// Client receipt time
    pub timestamp: DateTime<Utc>,
    /// Discussion round, when part of a multi-round discussion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion_round: Option<u32>,
    /// Marks the closing summary of a discussion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_summary: Option<bool>,
    /// Whether the message came from a discussion-mode exchange
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_discussion: Option<bool>,
    /// Marks the synthetic notice inserted ahead of a discussion batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_discussion_start: Option<bool>,
}

impl Message {
    fn plain(id: MessageId, sender: Sender, content: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            sender,
            content,
            timestamp,
            discussion_round: None,
            is_summary: None,
            is_discussion: None,
            is_discussion_start: None,
        }
    }

    /// Message typed by the user
    pub fn user(id: MessageId, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::plain(id, Sender::User, content.into(), timestamp)
    }

    /// Client-generated system notice
    pub fn system(id: MessageId, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::plain(id, Sender::System, content.into(), timestamp)
    }

    /// Reply from a named agent, without discussion metadata
    pub fn agent(
        id: MessageId,
        name: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::plain(id, Sender::Agent(name.into()), content.into(), timestamp)
    }

    /// True when this message belongs to a discussion and carries a round
    pub fn discussion_round_label(&self) -> Option<u32> {
        match (self.is_discussion, self.discussion_round) {
            (Some(true), Some(round)) => Some(round),
            _ => None,
        }
    }

    /// True for the closing summary of a discussion
    pub fn is_summary(&self) -> bool {
        self.is_summary.unwrap_or(false)
    }

    /// True for the synthetic discussion-start notice
    pub fn is_discussion_start(&self) -> bool {
        self.is_discussion_start.unwrap_or(false)
    }
}
