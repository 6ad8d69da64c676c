//! Viewer configuration.
//!
//! Loaded from a JSON file named by `SCREENTIME_VIEWER_CONFIG`; every field
//! has a default matching the survey's published column names.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the path of the config file.
pub const CONFIG_ENV_VAR: &str = "SCREENTIME_VIEWER_CONFIG";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Column names the analysis actions read.
    #[serde(default)]
    pub columns: SurveyColumns,

    /// Dataset loaded at start-up, if any.
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
}

/// Names of the survey columns used by the fixed analysis actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyColumns {
    #[serde(default = "default_age")]
    pub age: String,

    #[serde(default = "default_screen_time")]
    pub screen_time: String,

    #[serde(default = "default_device")]
    pub device: String,

    #[serde(default = "default_gender")]
    pub gender: String,
}

impl Default for SurveyColumns {
    fn default() -> Self {
        Self {
            age: default_age(),
            screen_time: default_screen_time(),
            device: default_device(),
            gender: default_gender(),
        }
    }
}

fn default_age() -> String {
    "Age".to_string()
}

fn default_screen_time() -> String {
    "Avg_Daily_Screen_Time".to_string()
}

fn default_device() -> String {
    "Primary_Device".to_string()
}

fn default_gender() -> String {
    "Gender".to_string()
}

impl ViewerConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ViewerConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`].
    ///
    /// Returns `Ok(None)` when the variable is unset.
    pub fn load_from_env() -> Result<Option<Self>> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Ok(Some(Self::load(Path::new(&path))?)),
            None => Ok(None),
        }
    }
}
