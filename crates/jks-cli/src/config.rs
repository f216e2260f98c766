//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Agenda read by `jks day` when no file is given.
    pub agenda_path: PathBuf,

    /// Minimum block height in seconds used when packing the day view.
    pub min_duration_secs: i64,

    /// Row height of the text grid, in minutes.
    pub slot_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            agenda_path: data_dir.join("agenda.json"),
            min_duration_secs: 15 * 60,
            slot_minutes: 30,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (JKS_*)
        figment = figment.merge(Env::prefixed("JKS_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for jks.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("jks"))
}

/// Returns the platform-specific data directory for jks.
///
/// On Linux: `~/.local/share/jks`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("jks"))
}
