//! Roundtable - terminal client for multi-agent chat
//!
#![doc = "Main entry point for the Roundtable client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use roundtable::cli::{Cli, Commands};
use roundtable::commands;
use roundtable::config::{Config, DEFAULT_CONFIG_PATH};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat => {
            tracing::info!("Starting interactive chat mode");
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Send { message, json } => {
            tracing::info!("Sending one message");
            commands::send::run_send(config, message, json).await?;
            Ok(())
        }
        Commands::Context { json } => {
            tracing::info!("Fetching context snapshot");
            commands::context::show_context(config, json).await?;
            Ok(())
        }
        Commands::Discuss {
            topic,
            rounds,
            json,
        } => {
            tracing::info!("Starting discussion");
            if let Some(r) = rounds {
                tracing::debug!("Using rounds override: {}", r);
            }
            commands::discussion::run_discussion(config, topic, rounds, json).await?;
            Ok(())
        }
        Commands::Status { json } => {
            tracing::info!("Querying discussion status");
            commands::discussion::show_status(config, json).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so rendered output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "roundtable=debug"
    } else {
        "roundtable=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
