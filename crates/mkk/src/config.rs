//! Configuration loading and validation.
//!
//! Defaults are read from `MKK_*` environment variables; command-line flags
//! override them in `main`. Format and encoding names are parsed only when no
//! flag replaces them, so a bad variable is harmless once overridden.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::encoding::Encoding;
use crate::output::OutputFormat;

/// Validated tool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracing log level (`MKK_LOG_LEVEL`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format name (`MKK_FORMAT`).
    #[serde(default = "default_format")]
    pub format: String,

    /// Text encoding name (`MKK_ENCODING`).
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_log_level() -> String {
    "warn".into()
}
fn default_format() -> String {
    "declaration".into()
}
fn default_encoding() -> String {
    "utf-8".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be deserialised or the log level
    /// is empty.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::with_prefix("MKK"))
    }

    fn from_environment(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("MKK_LOG_LEVEL must not be empty");
        }
        Ok(())
    }

    /// Parsed [`OutputFormat`].
    ///
    /// # Errors
    ///
    /// Returns an error if `MKK_FORMAT` names an unknown format.
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.format
            .parse()
            .map_err(|e: String| anyhow::anyhow!("MKK_FORMAT: {e}"))
    }

    /// Parsed [`Encoding`].
    ///
    /// # Errors
    ///
    /// Returns an error if `MKK_ENCODING` names an unknown encoding.
    pub fn text_encoding(&self) -> Result<Encoding> {
        self.encoding
            .parse()
            .map_err(|e: String| anyhow::anyhow!("MKK_ENCODING: {e}"))
    }
}
