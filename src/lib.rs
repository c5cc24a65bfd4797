//! Roundtable - terminal client for multi-agent chat
//!
//! This library provides the client side of a conversation with a panel of
//! backend agents: the HTTP transport, the conversation model that turns
//! backend responses into an ordered timeline, and the terminal renderer.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `transport`: Backend trait, wire types, HTTP and scripted implementations
//! - `conversation`: Messages, id allocation, response normalisation, state
//! - `session`: Send admission gate, reply delivery, context fetches
//! - `render`: Pure text rendering of the timeline and context panel
//! - `commands`: CLI command handlers and the interactive loop
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use roundtable::{ChatSession, Config, HttpBackend};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let backend = HttpBackend::new(&config.backend)?;
//!     let mut session = ChatSession::new(Arc::new(backend));
//!     session.send("What should we build next?").await;
//!
//!     for message in session.state().messages() {
//!         println!("{}: {}", message.sender, message.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod render;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use config::Config;
pub use conversation::{ConversationState, Message, MessageId, Sender};
pub use error::{Result, RoundtableError};
pub use session::{ChatSession, SendOutcome};
pub use transport::{Backend, ChatResult, HttpBackend};

#[cfg(test)]
pub mod test_utils;
