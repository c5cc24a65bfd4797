//! Client-side conversation model
//!
//! - [`message`]: timeline entries and sender identities
//! - [`ids`]: id allocation and the receipt clock
//! - [`normalizer`]: backend response to timeline batch, round boundaries
//! - [`state`]: the append-only timeline with loading and context flags

pub mod ids;
pub mod message;
pub mod normalizer;
pub mod state;

pub use ids::{Clock, IdAllocator, SystemClock};
pub use message::{Message, MessageId, Sender};
pub use normalizer::{
    normalize, round_boundaries, round_label_before, RoundBoundary, DISCUSSION_START_NOTICE,
};
pub use state::{ContextPanel, ContextView, ConversationState};
