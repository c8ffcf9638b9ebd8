use crate::api::DEFAULT_BASE_URL;
use crate::keymap::Keymap;
use crate::styles::ThemeType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// UI theme: dark, light or nocolor
    #[serde(default)]
    pub theme: ThemeType,
    /// What a list or form does when a delete or save fails
    #[serde(default)]
    pub mutations: MutationPolicy,
    /// Per-request timeout in seconds. No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Keymap preset and overrides
    #[serde(default)]
    pub keymap: Keymap,
}

/// How deletes and saves treat the server's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationPolicy {
    /// Rows disappear and forms close only once the server said yes.
    #[default]
    Confirmed,
    /// Rows disappear and forms close as soon as the request finished,
    /// whatever the outcome. Failures are only logged.
    Optimistic,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            theme: ThemeType::default(),
            mutations: MutationPolicy::default(),
            request_timeout_secs: None,
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, writing the defaults there first if
    /// the file does not exist yet.
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

            if config.base_url.trim().is_empty() {
                config.base_url = default_base_url();
            }
            for (key, reason) in config.keymap.invalid_overrides() {
                tracing::warn!("Ignoring keymap override '{}': {}", key, reason);
            }
            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            tracing::info!("Created default config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Save configuration to file with owner-only permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // 600: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Theme to install, given whether `NO_COLOR` is set.
    pub fn effective_theme(&self, no_color: bool) -> ThemeType {
        if no_color {
            ThemeType::NoColor
        } else {
            self.theme
        }
    }
}
