//! Configuration management.
//!
//! Loads configuration from ${RUNBOARD_HOME}/config.toml with sensible
//! defaults. A missing file is not an error; a malformed one is.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for runboard configuration and data directories.
    //!
    //! RUNBOARD_HOME resolution order:
    //! 1. RUNBOARD_HOME environment variable (if set)
    //! 2. ~/.config/runboard (default)

    use std::path::PathBuf;

    /// Returns the runboard home directory.
    pub fn runboard_home() -> PathBuf {
        if let Ok(home) = std::env::var("RUNBOARD_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("runboard"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        runboard_home().join("config.toml")
    }

    /// Returns the directory dashboard log files are written to.
    pub fn logs_dir() -> PathBuf {
        runboard_home().join("logs")
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the telemetry server.
    pub server_url: String,

    /// Seconds between automatic dashboard refreshes.
    pub refresh_interval_secs: u64,

    /// Whether the dashboard refreshes automatically.
    pub auto_refresh: bool,
}

impl Config {
    const DEFAULT_SERVER_URL: &'static str = "http://127.0.0.1:5000";
    const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: Self::DEFAULT_SERVER_URL.to_string(),
            refresh_interval_secs: Self::DEFAULT_REFRESH_INTERVAL_SECS,
            auto_refresh: true,
        }
    }
}
