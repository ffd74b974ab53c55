//! Configuration file loading for marklint.
//!
//! Reads `.marklint/marklint.json` and provides typed access to all settings.
//! Falls back to sensible defaults when the config file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_DIR: &str = ".marklint";
pub const CONFIG_FILE: &str = "marklint.json";

/// Top-level marklint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarklintConfig {
    pub version: String,
    #[serde(default)]
    pub enforce: EnforceConfig,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

/// Rule behaviour toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnforceConfig {
    /// When set, the partial-type rule gives up on a type as soon as it meets a
    /// member that is neither a field nor a property.
    #[serde(default = "default_true")]
    pub skip_types_with_other_members: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_true() -> bool {
    true
}

impl Default for EnforceConfig {
    fn default() -> Self {
        Self {
            skip_types_with_other_members: true,
        }
    }
}

impl Default for MarklintConfig {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            enforce: EnforceConfig::default(),
            ignore_patterns: vec![],
        }
    }
}

impl MarklintConfig {
    /// Load configuration from `marklint.json` inside the given config directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(config_dir: &Path) -> Self {
        match Self::try_load(config_dir) {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.join(CONFIG_FILE).display(),
                    error = %e,
                    "failed to read config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Like [`MarklintConfig::load`], but surfaces errors. `Ok(None)` when no file exists.
    pub fn try_load(config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&config_path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_dir.join(CONFIG_FILE), content + "\n")?;
        Ok(())
    }
}
