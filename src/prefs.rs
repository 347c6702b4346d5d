use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::rank::SortDirection;

/// Persisted user preferences: the selected browser/OS filter, sort
/// direction, and the active agent string. Every key has a default, so a
/// missing file or missing key resolves the same way.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Preferences {
    #[serde(default = "default_browser")]
    pub browser: String,
    #[serde(default = "default_os")]
    pub os: String,
    #[serde(default)]
    pub sort: SortDirection,
    /// Active agent string; empty means no agent is active.
    #[serde(default)]
    pub ua: String,
}

fn default_browser() -> String {
    "Chrome".to_string()
}

fn default_os() -> String {
    "Windows".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            browser: default_browser(),
            os: default_os(),
            sort: SortDirection::default(),
            ua: String::new(),
        }
    }
}

/// A snapshot of user intent handed to the controller. The core never reads
/// live preference state directly.
#[derive(Debug, Clone)]
pub struct Selection {
    pub browser: String,
    pub os: String,
    pub sort: SortDirection,
    pub active_ua: String,
}

impl Preferences {
    pub fn prefs_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("uaswitch").join("prefs.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = match Self::prefs_path() {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences: {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse prefs.toml")
    }

    pub fn save(&self) -> Result<()> {
        let path = match Self::prefs_path() {
            Some(p) => p,
            None => anyhow::bail!("Could not determine config directory"),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize preferences")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write preferences: {}", path.display()))?;

        Ok(())
    }

    /// Snapshot the stored preferences as the selection for one refresh
    /// pass. An empty active UA means no row gets marked; unlike the
    /// browser popup this tool grew out of, a terminal has no ambient
    /// platform user-agent to fall back to.
    pub fn selection(&self) -> Selection {
        Selection {
            browser: self.browser.clone(),
            os: self.os.clone(),
            sort: self.sort,
            active_ua: self.ua.clone(),
        }
    }
}
