//! Configuration module for Confab.

use serde::Deserialize;
use std::path::Path;

use crate::{ConfabError, Result};

/// Command handling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// Prefix character that marks an input line as a command.
    #[serde(default = "default_prefix")]
    pub prefix: char,
}

fn default_prefix() -> char {
    '/'
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file (empty for console-only logging).
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    String::new()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Command handling configuration.
    #[serde(default)]
    pub commands: CommandsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfabError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(s).map_err(|e| ConfabError::Config(format!("config parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the command prefix is a character that can start
    /// an ordinary message (alphanumeric or whitespace).
    pub fn validate(&self) -> Result<()> {
        let prefix = self.commands.prefix;
        if prefix.is_alphanumeric() || prefix.is_whitespace() {
            return Err(ConfabError::Config(format!(
                "command prefix {prefix:?} would shadow ordinary messages; \
                 use a punctuation character such as '/'"
            )));
        }
        Ok(())
    }
}
