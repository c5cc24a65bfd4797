//! Configuration management for Roundtable
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! Precedence, lowest to highest: built-in defaults, YAML file,
//! `ROUNDTABLE_*` environment variables, command-line flags.

use crate::error::{Result, RoundtableError};
use crate::transport::MAX_DISCUSSION_ROUNDS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/roundtable.yaml";

/// Main configuration structure for Roundtable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Interactive chat and rendering settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Backend connection configuration
///
/// All requests are issued against `base_url`, e.g. `POST {base_url}/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the agent backend API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("roundtable/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Rounds requested when starting a discussion without an explicit count
    #[serde(default = "default_max_rounds")]
    pub default_max_rounds: u32,

    /// Show receipt timestamps next to each message
    #[serde(default = "default_show_timestamps")]
    pub show_timestamps: bool,

    /// Open the context panel when an interactive session starts
    #[serde(default)]
    pub show_context_on_start: bool,
}

fn default_max_rounds() -> u32 {
    crate::transport::DEFAULT_MAX_ROUNDS
}

fn default_show_timestamps() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_max_rounds: default_max_rounds(),
            show_timestamps: default_show_timestamps(),
            show_context_on_start: false,
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed command line, used for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RoundtableError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| RoundtableError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("ROUNDTABLE_BASE_URL") {
            self.backend.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("ROUNDTABLE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.backend.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid ROUNDTABLE_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(rounds) = std::env::var("ROUNDTABLE_MAX_ROUNDS") {
            if let Ok(value) = rounds.parse() {
                self.chat.default_max_rounds = value;
            } else {
                tracing::warn!("Invalid ROUNDTABLE_MAX_ROUNDS: {}", rounds);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.base_url {
            tracing::debug!("Using base URL override from CLI: {}", base_url);
            self.backend.base_url = base_url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.backend.base_url).map_err(|e| {
            RoundtableError::Config(format!(
                "Invalid backend.base_url '{}': {}",
                self.backend.base_url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(RoundtableError::Config(format!(
                "backend.base_url must use http or https, got: {}",
                url.scheme()
            ))
            .into());
        }

        if self.backend.timeout_seconds == 0 {
            return Err(RoundtableError::Config(
                "backend.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.default_max_rounds == 0 {
            return Err(RoundtableError::Config(
                "chat.default_max_rounds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.default_max_rounds > MAX_DISCUSSION_ROUNDS {
            return Err(RoundtableError::Config(format!(
                "chat.default_max_rounds must be less than or equal to {}",
                MAX_DISCUSSION_ROUNDS
            ))
            .into());
        }

        Ok(())
    }
}
