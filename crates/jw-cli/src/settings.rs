//! Harness settings: where the store lives.
//!
//! Distinct from the tracked-work configuration (`jw config`), which is a
//! document inside the store itself.

use std::fmt;
use std::path::PathBuf;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the timeline, config and auth documents.
    pub data_dir: PathBuf,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self { data_dir }
    }
}

impl Settings {
    /// Loads settings from defaults, the config file and `JW_*` env vars.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        figment = figment.merge(Env::prefixed("JW_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for jw.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("jw"))
}

/// Returns the platform-specific data directory for jw.
///
/// On Linux: `~/.local/share/jw`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("jw"))
}
