//! Command-line interface definition for Roundtable
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot sends, context
//! inspection, and discussion control.

use clap::{Parser, Subcommand};

/// Roundtable - chat with a panel of backend agents
///
/// Sends your messages to an agent backend and renders every agent's
/// reply, including multi-round discussions, in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "roundtable")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: Option<String>,

    /// Override the backend base URL (e.g. http://localhost:8000/api)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Roundtable
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session with the agents
    Chat,

    /// Send a single message and print the agents' replies
    Send {
        /// Message text to send
        message: String,

        /// Print the resulting timeline as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the backend's shared and per-agent context
    Context {
        /// Print the raw context snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the agents to discuss a topic over several rounds
    Discuss {
        /// Topic to discuss
        topic: String,

        /// Maximum number of discussion rounds, 1 to 20 (defaults to config)
        #[arg(
            short,
            long,
            value_parser = clap::value_parser!(u32)
                .range(1..=i64::from(crate::transport::MAX_DISCUSSION_ROUNDS))
        )]
        rounds: Option<u32>,

        /// Print the resulting timeline as JSON (or the raw payload when it has no replies)
        #[arg(long)]
        json: bool,
    },

    /// Show the status of the backend's current discussion
    Status {
        /// Print the raw status payload as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
