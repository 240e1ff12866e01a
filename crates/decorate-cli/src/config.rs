//! Configuration file loading.
//!
//! ```toml
//! [intercept]
//! pass_inputs = true
//! pass_func = false
//! pass_output = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use decorate_intercept::InterceptConfig;

/// Contents of a configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Interceptor flags used when none are given on the command line.
    pub intercept: InterceptConfig,
}

impl CliConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid configuration")
    }

    /// Load the configuration at `path`, or the defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))
    }
}
