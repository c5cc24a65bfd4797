//! Backend response normalisation and round-boundary derivation
//!
//! [`normalize`] turns a decoded `/chat` response into the ordered batch of
//! timeline messages that gets appended in one step. [`round_boundaries`]
//! is the derived view the renderer uses to place "Round N" separators.

use super::ids::{Clock, IdAllocator};
use super::message::Message;
use crate::transport::{ChatEnvelope, ChatResult, FlatReply};

/// Text of the system notice inserted ahead of a discussion batch
pub const DISCUSSION_START_NOTICE: &str = "The agents discussed this topic as follows:";

/// Convert a backend response into timeline messages.
///
/// Flat replies become plain agent messages. Rich replies additionally carry
/// `discussionRound`, `isSummary`, and the envelope's `isDiscussion` flag on
/// every message. When the envelope is a discussion with at least one reply,
/// a [`DISCUSSION_START_NOTICE`] system message is placed first; its id is
/// allocated immediately before the first agent message's id.
///
/// A round of `0` is treated as absent, since rounds are positive.
///
/// # Examples
///
/// ```
/// use roundtable::conversation::{normalize, IdAllocator, Sender, SystemClock};
/// use roundtable::transport::{ChatResult, FlatReply};
///
/// let mut ids = IdAllocator::new();
/// let batch = normalize(
///     ChatResult::Flat(vec![FlatReply {
///         agent_name: "A".to_string(),
///         content: "hi".to_string(),
///     }]),
///     &SystemClock,
///     &mut ids,
/// );
///
/// assert_eq!(batch.len(), 1);
/// assert_eq!(batch[0].sender, Sender::Agent("A".to_string()));
/// assert_eq!(batch[0].is_discussion, None);
/// ```
pub fn normalize(result: ChatResult, clock: &dyn Clock, ids: &mut IdAllocator) -> Vec<Message> {
    match result {
        ChatResult::Flat(replies) => normalize_flat(replies, clock, ids),
        ChatResult::Rich(envelope) => normalize_rich(envelope, clock, ids),
    }
}

fn normalize_flat(replies: Vec<FlatReply>, clock: &dyn Clock, ids: &mut IdAllocator) -> Vec<Message> {
    replies
        .into_iter()
        .map(|reply| Message::agent(ids.allocate(), reply.agent_name, reply.content, clock.now()))
        .collect()
}

fn normalize_rich(envelope: ChatEnvelope, clock: &dyn Clock, ids: &mut IdAllocator) -> Vec<Message> {
    let ChatEnvelope {
        is_discussion,
        responses,
    } = envelope;

    let mut batch = Vec::with_capacity(responses.len() + 1);

    if is_discussion && !responses.is_empty() {
        let mut notice = Message::system(ids.allocate(), DISCUSSION_START_NOTICE, clock.now());
        notice.is_discussion_start = Some(true);
        batch.push(notice);
    }

    for reply in responses {
        let mut message =
            Message::agent(ids.allocate(), reply.agent_name, reply.content, clock.now());
        message.discussion_round = reply.round.filter(|round| *round > 0);
        message.is_summary = Some(reply.is_summary.unwrap_or(false));
        message.is_discussion = Some(is_discussion);
        batch.push(message);
    }

    batch
}

/// A "Round N" separator placed directly before `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundBoundary {
    /// Position in the timeline the separator precedes
    pub index: usize,
    /// Round number shown on the separator
    pub round: u32,
}

/// Round label due directly before `messages[index]`, if any.
///
/// A label is due when the message is a discussion message with a round and
/// it is either first or its predecessor has a different round.
pub fn round_label_before(messages: &[Message], index: usize) -> Option<u32> {
    let round = messages.get(index)?.discussion_round_label()?;
    let previous_round = index
        .checked_sub(1)
        .and_then(|prev| messages[prev].discussion_round);

    (previous_round != Some(round)).then_some(round)
}

/// Every round separator for a timeline, in order.
///
/// Each boundary depends only on a message and its predecessor, so
/// recomputing over an unchanged prefix yields identical placements.
pub fn round_boundaries(messages: &[Message]) -> Vec<RoundBoundary> {
    (0..messages.len())
        .filter_map(|index| {
            round_label_before(messages, index).map(|round| RoundBoundary { index, round })
        })
        .collect()
}
