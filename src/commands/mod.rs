/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes four top-level command modules:

- `chat`       — Interactive chat session
- `send`       — Send one message and print the replies
- `context`    — Show the backend's context snapshot
- `discussion` — Start a discussion or query its status

These handlers are intentionally small and use the library components:
the transport, the chat session, and the renderer.
*/

use crate::config::Config;
use crate::error::{Result, RoundtableError};
use crate::render::{self, RenderOptions};
use crate::session::{ChatSession, DiscussionOutcome, SendOutcome, SendRejected};
use crate::transport::{Backend, HttpBackend};
use std::sync::Arc;

// Special commands parser for interactive chat
pub mod special_commands;

fn connect(config: &Config) -> Result<Arc<dyn Backend>> {
    let backend = HttpBackend::new(&config.backend)?;
    Ok(Arc::new(backend))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Connects to the backend, creates a `ChatSession`, and runs a
    //! readline-based loop. Plain lines are sent to the agents; lines
    //! starting with `/` are special commands.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Errors
    ///
    /// Returns error if the backend client or the line editor cannot be
    /// created. Backend failures during the session are shown inline and do
    /// not end the session.
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let backend = connect(&config)?;
        let mut session = ChatSession::new(backend);
        let options = RenderOptions::from(&config.chat);

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&config);

        if config.chat.show_context_on_start {
            session.toggle_context().await;
            print_context(&session);
        }

        loop {
            match rl.readline(&format!("{} ", "you>".cyan().bold())) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::ToggleContext => {
                            if session.toggle_context().await {
                                print_context(&session);
                            } else {
                                println!("{}\n", "Context hidden".dimmed());
                            }
                        }
                        SpecialCommand::RefreshContext => {
                            if !session.state().context().is_visible() {
                                session.toggle_context().await;
                            } else {
                                session.refresh_context().await;
                            }
                            print_context(&session);
                        }
                        SpecialCommand::Discuss { topic, rounds } => {
                            let rounds = rounds.unwrap_or(config.chat.default_max_rounds);
                            print_waiting();
                            let before = session.state().len();
                            match session.start_discussion(&topic, rounds).await {
                                DiscussionOutcome::Rejected(reason) => {
                                    let message = format!("Discussion not started: {}", reason);
                                    eprintln!("{}\n", message.red());
                                    continue;
                                }
                                DiscussionOutcome::Opaque(payload) => {
                                    print!("{}", render::render_payload(&payload.0));
                                }
                                DiscussionOutcome::Delivered { .. }
                                | DiscussionOutcome::Failed => {}
                            }
                            print_replies(&session, before, &options);
                        }
                        SpecialCommand::DiscussionStatus => {
                            match session.discussion_status().await {
                                Ok(status) => println!("{}", render::render_payload(&status.0)),
                                Err(e) => {
                                    tracing::warn!("Discussion status request failed: {:#}", e);
                                    eprintln!("{}\n", format!("Error: {}", e).red());
                                }
                            }
                        }
                        SpecialCommand::History => {
                            print!(
                                "{}",
                                render::render_timeline(session.state().messages(), &options)
                            );
                            println!();
                        }
                        SpecialCommand::Help => print_help(),
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            print_waiting();
                            let before = session.state().len();
                            if let SendOutcome::Rejected(SendRejected::Busy) =
                                session.send(trimmed).await
                            {
                                println!("{}", "Still waiting for the previous reply".yellow());
                            }
                            print_replies(&session, before, &options);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Print what a send appended, skipping the user line the editor already echoed
    fn print_replies(session: &ChatSession, before: usize, options: &RenderOptions) {
        let messages = session.state().messages();
        let start = (before + 1).min(messages.len());
        print!("{}", render::render_from(messages, start, options));
        println!();
    }

    fn print_context(session: &ChatSession) {
        if let Some(view) = session.state().context().view() {
            println!("{}", render::render_context(view));
        }
    }

    fn print_waiting() {
        println!("{}", "Waiting for the agents...".dimmed());
    }

    /// Display welcome banner at the start of interactive chat mode
    fn print_welcome_banner(config: &Config) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              Roundtable Multi-Agent Chat - Welcome!          ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Backend: {}", config.backend.base_url.cyan());
        println!("Type '/help' for available commands, 'exit' to quit\n");
        println!("{}\n", render::EMPTY_TIMELINE_HINT.dimmed());
    }
}

// One-shot send handler
pub mod send {
    //! Send one message and print the resulting conversation.

    use super::*;

    /// Send `message` and print the timeline (user message plus replies)
    ///
    /// A failed send is reported inside the timeline, like in interactive
    /// mode, and does not make the command fail.
    ///
    /// # Errors
    ///
    /// Returns error if the backend client cannot be created or the input
    /// is blank
    pub async fn run_send(config: Config, message: String, json: bool) -> Result<()> {
        let backend = connect(&config)?;
        let mut session = ChatSession::new(backend);

        if let SendOutcome::Rejected(reason) = session.send(&message).await {
            return Err(RoundtableError::Input(format!("message not sent: {}", reason)).into());
        }

        if json {
            print_json(session.state().messages())
        } else {
            print!(
                "{}",
                render::render_timeline(session.state().messages(), &RenderOptions::from(&config.chat))
            );
            Ok(())
        }
    }
}

// Context inspection handler
pub mod context {
    //! Fetch and print the backend's context snapshot.

    use super::*;

    /// Fetch the context and print the panel (or the raw snapshot as JSON)
    ///
    /// A failed fetch prints the error marker; it is not a command failure.
    pub async fn show_context(config: Config, json: bool) -> Result<()> {
        let backend = connect(&config)?;
        let mut session = ChatSession::new(backend);
        session.toggle_context().await;

        match session.state().context().view() {
            Some(crate::conversation::ContextView::Snapshot(snapshot)) if json => print_json(snapshot),
            Some(crate::conversation::ContextView::Unavailable(marker)) if json => {
                print_json(&serde_json::json!({ "error": marker }))
            }
            Some(view) => {
                print!("{}", render::render_context(view));
                Ok(())
            }
            None => Ok(()),
        }
    }
}

// Discussion handlers
pub mod discussion {
    //! Start a discussion or query its status.

    use super::*;

    /// Ask the agents to discuss `topic` and print what comes back
    ///
    /// # Errors
    ///
    /// Returns error if the backend client cannot be created or the topic
    /// is blank
    pub async fn run_discussion(
        config: Config,
        topic: String,
        rounds: Option<u32>,
        json: bool,
    ) -> Result<()> {
        let rounds = rounds.unwrap_or(config.chat.default_max_rounds);
        tracing::debug!("Starting discussion with up to {} rounds", rounds);

        let backend = connect(&config)?;
        let mut session = ChatSession::new(backend);

        match session.start_discussion(&topic, rounds).await {
            DiscussionOutcome::Rejected(reason) => {
                Err(RoundtableError::Input(format!("discussion not started: {}", reason)).into())
            }
            DiscussionOutcome::Opaque(payload) if json => print_json(&payload),
            DiscussionOutcome::Opaque(payload) => {
                println!("Discussion started:");
                print!("{}", render::render_payload(&payload.0));
                Ok(())
            }
            DiscussionOutcome::Delivered { .. } | DiscussionOutcome::Failed => {
                if json {
                    print_json(session.state().messages())
                } else {
                    print!(
                        "{}",
                        render::render_timeline(
                            session.state().messages(),
                            &RenderOptions::from(&config.chat)
                        )
                    );
                    Ok(())
                }
            }
        }
    }

    /// Print the backend's discussion status
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn show_status(config: Config, json: bool) -> Result<()> {
        let backend = connect(&config)?;
        let session = ChatSession::new(backend);
        let status = session.discussion_status().await?;

        if json {
            print_json(&status)
        } else {
            println!("Discussion status:");
            print!("{}", render::render_payload(&status.0));
            Ok(())
        }
    }
}
