//! Profile slots, snapshots and their on-disk storage

pub mod config;
pub mod error;
pub mod mode;
pub mod snapshot;
pub mod storage;

pub use config::{load_config, Config};
pub use error::StoreError;
pub use mode::{ModeDetector, ModeSource};
pub use snapshot::ProfileSnapshot;
pub use storage::{ProfileStore, StoreConfig};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One of the two persistence buckets a snapshot can be saved into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Work,
    #[default]
    Personal,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Work, Slot::Personal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Work => "work",
            Slot::Personal => "personal",
        }
    }

    pub fn other(&self) -> Slot {
        match self {
            Slot::Work => Slot::Personal,
            Slot::Personal => Slot::Work,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = StoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" => Ok(Slot::Work),
            "personal" => Ok(Slot::Personal),
            other => Err(StoreError::UnknownSlot(other.to_string())),
        }
    }
}

/// Directory holding `config.toml`. Only resolved, never created: nothing
/// writes into it, and a read-only run must leave the disk untouched.
pub fn get_app_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot find config directory"))?
        .join("workswitch");

    #[cfg(not(target_os = "linux"))]
    let dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
        .join(".workswitch");

    Ok(dir)
}
