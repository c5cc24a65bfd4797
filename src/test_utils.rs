//! Test utilities for Roundtable
//!
//! Deterministic clock and canned backend payloads shared by unit tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};

use crate::conversation::Clock;
use crate::transport::{ChatEnvelope, ChatResult, DiscussionReply, FlatReply};

/// Clock that starts at a fixed instant and advances one second per reading
#[derive(Debug, Default)]
pub struct StepClock {
    ticks: AtomicI64,
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(tick)
    }
}

/// Three-reply, two-round discussion whose last reply is the summary
pub fn discussion_payload() -> ChatResult {
    ChatResult::Rich(ChatEnvelope {
        is_discussion: true,
        responses: vec![
            DiscussionReply {
                agent_name: "A".to_string(),
                content: "x".to_string(),
                round: Some(1),
                is_summary: None,
            },
            DiscussionReply {
                agent_name: "B".to_string(),
                content: "y".to_string(),
                round: Some(1),
                is_summary: None,
            },
            DiscussionReply {
                agent_name: "A".to_string(),
                content: "z".to_string(),
                round: Some(2),
                is_summary: Some(true),
            },
        ],
    })
}

/// Flat payload with one reply per named agent
pub fn flat_payload(agents: &[&str]) -> ChatResult {
    ChatResult::Flat(
        agents
            .iter()
            .map(|name| FlatReply {
                agent_name: name.to_string(),
                content: format!("{} says hello", name),
            })
            .collect(),
    )
}
