//! Common CLI utilities shared across all CLI commands.
//!
//! This module provides:
//! - `CliContext`: loaded config plus an API client for one invocation
//! - Output helpers: `print_success`, `print_error`, `print_info`

use crate::api::ApiClient;
use crate::config::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Shared context for CLI commands.
pub struct CliContext {
    /// The loaded configuration, with command-line overrides applied
    pub config: Config,
    /// Path the configuration was read from
    pub config_path: PathBuf,
    pub client: ApiClient,
}

impl CliContext {
    /// Load the configuration at `config_path` and build a client for it.
    ///
    /// `base_url` replaces the configured URL for this run only; it is never
    /// written back to disk.
    pub fn load(config_path: &Path, base_url: Option<&str>) -> Result<Self> {
        let config = load_config(config_path, base_url)?;
        let client = ApiClient::new(&config.base_url, config.request_timeout())
            .with_context(|| format!("Invalid base URL '{}'", config.base_url))?;

        Ok(Self {
            config,
            config_path: config_path.to_path_buf(),
            client,
        })
    }
}

/// Load config from disk (creating it on first run) and apply a URL override.
pub fn load_config(config_path: &Path, base_url: Option<&str>) -> Result<Config> {
    let mut config =
        Config::load_or_create(config_path).context("Failed to load configuration")?;
    if let Some(url) = base_url {
        config.base_url = url.to_string();
    }
    Ok(config)
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}
