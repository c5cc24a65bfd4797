//! Special commands parser for interactive chat mode
//!
//! Special commands control the session rather than being sent to the
//! agents. They allow users to:
//! - Open or close the context panel, or refresh it
//! - Start a multi-round discussion on a topic
//! - Query the backend's discussion status
//! - Re-print the whole conversation
//! - Display help information
//! - Exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive. `exit` and
//! `quit` also work without the prefix.

use thiserror::Error;

use crate::transport::MAX_DISCUSSION_ROUNDS;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Open or close the context panel
    ///
    /// Opening the panel fetches a fresh snapshot from the backend.
    ToggleContext,

    /// Fetch the context snapshot again and show the panel
    RefreshContext,

    /// Start a discussion on a topic
    ///
    /// The optional round count overrides the configured default.
    Discuss {
        /// Topic text, case preserved
        topic: String,
        /// Explicit round count
        rounds: Option<u32>,
    },

    /// Show the backend's discussion status
    DiscussionStatus,

    /// Re-print the whole conversation
    History,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the agents.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an invalid argument.
/// Returns CommandError::MissingArgument if a command requires an argument but none was provided.
///
/// # Examples
///
/// ```
/// use roundtable::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/context").unwrap();
/// assert_eq!(cmd, SpecialCommand::ToggleContext);
///
/// let cmd = parse_special_command("/discuss --rounds 2 AI safety").unwrap();
/// assert_eq!(
///     cmd,
///     SpecialCommand::Discuss { topic: "AI safety".to_string(), rounds: Some(2) }
/// );
///
/// let cmd = parse_special_command("hello agents").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') {
        return Ok(match lower.as_str() {
            "exit" | "quit" => SpecialCommand::Exit,
            _ => SpecialCommand::None,
        });
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match command.as_str() {
        "/context" | "/ctx" => no_argument(&command, rest, SpecialCommand::ToggleContext),
        "/refresh" => no_argument(&command, rest, SpecialCommand::RefreshContext),
        "/status" => no_argument(&command, rest, SpecialCommand::DiscussionStatus),
        "/history" => no_argument(&command, rest, SpecialCommand::History),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        "/discuss" => parse_discuss(rest),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn no_argument(
    command: &str,
    rest: &str,
    parsed: SpecialCommand,
) -> Result<SpecialCommand, CommandError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: rest.to_string(),
        })
    }
}

fn parse_discuss(rest: &str) -> Result<SpecialCommand, CommandError> {
    let usage = || CommandError::MissingArgument {
        command: "/discuss".to_string(),
        usage: "/discuss [--rounds N] <topic>".to_string(),
    };

    let (rounds, topic) = match rest.strip_prefix("--rounds") {
        Some(after_flag) => {
            let after_flag = after_flag.trim_start();
            let (value, topic) = after_flag
                .split_once(char::is_whitespace)
                .unwrap_or((after_flag, ""));
            if value.is_empty() {
                return Err(usage());
            }
            let rounds = value
                .parse::<u32>()
                .ok()
                .filter(|r| (1..=MAX_DISCUSSION_ROUNDS).contains(r))
                .ok_or_else(|| CommandError::UnsupportedArgument {
                    command: "/discuss --rounds".to_string(),
                    arg: value.to_string(),
                })?;
            (Some(rounds), topic.trim())
        }
        None => (None, rest),
    };

    if topic.is_empty() {
        return Err(usage());
    }

    Ok(SpecialCommand::Discuss {
        topic: topic.to_string(),
        rounds,
    })
}

/// Display help information for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
==========================================

CONTEXT:
  /context        - Show or hide the shared and per-agent context
  /ctx            - Shorthand for /context
  /refresh        - Fetch the context again and show it

DISCUSSION:
  /discuss <topic>              - Ask the agents to discuss a topic
  /discuss --rounds N <topic>   - Same, with at most N rounds (1-20)
  /status                       - Show the backend's discussion status

SESSION:
  /history        - Print the whole conversation again
  /help           - Show this help message
  /exit, exit     - Exit the session (also: quit, CTRL-D)

Anything else you type is sent to the agents.
"#
    );
}
