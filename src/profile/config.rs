//! User configuration management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::get_app_dir;
use super::storage::{
    StoreConfig, DEFAULT_MODE_MARKER_FILE, DEFAULT_PERSONAL_FILE, DEFAULT_WORK_FILE,
};
use crate::automation::DEFAULT_BROWSER;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub switch: SwitchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the slot files. Defaults to the home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<String>,

    #[serde(default = "default_work_file")]
    pub work_file: String,

    #[serde(default = "default_personal_file")]
    pub personal_file: String,

    #[serde(default = "default_mode_marker_file")]
    pub mode_marker_file: String,

    #[serde(default = "default_true")]
    pub use_mode_marker: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: None,
            work_file: default_work_file(),
            personal_file: default_personal_file(),
            mode_marker_file: default_mode_marker_file(),
            use_mode_marker: true,
        }
    }
}

fn default_work_file() -> String {
    DEFAULT_WORK_FILE.to_string()
}

fn default_personal_file() -> String {
    DEFAULT_PERSONAL_FILE.to_string()
}

fn default_mode_marker_file() -> String {
    DEFAULT_MODE_MARKER_FILE.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_browser")]
    pub name: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            name: default_browser(),
        }
    }
}

fn default_browser() -> String {
    DEFAULT_BROWSER.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Save the outgoing session to the detected slot instead of always
    /// treating it as the opposite of the target.
    #[serde(default)]
    pub detect_outgoing: bool,
}

fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(load_config()?.unwrap_or_default())
    }

    /// Resolve the storage layout. `state_dir_override` (from the CLI or
    /// environment) wins over the config file, which wins over `$HOME`.
    pub fn store_config(&self, state_dir_override: Option<&Path>) -> Result<StoreConfig> {
        let state_dir = match (state_dir_override, &self.storage.state_dir) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(dir)) => expand_home(dir),
            (None, None) => {
                dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            }
        };

        Ok(StoreConfig {
            state_dir,
            work_file: self.storage.work_file.clone(),
            personal_file: self.storage.personal_file.clone(),
            mode_marker_file: self.storage.mode_marker_file.clone(),
        })
    }
}

pub fn load_config() -> Result<Option<Config>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(Some(config))
}

fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
