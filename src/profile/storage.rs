//! Profile storage - one JSON file per slot

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

use super::error::{Result, StoreError};
use super::{ProfileSnapshot, Slot};

pub const DEFAULT_WORK_FILE: &str = ".work_profile_state.json";
pub const DEFAULT_PERSONAL_FILE: &str = ".personal_profile_state.json";
pub const DEFAULT_MODE_MARKER_FILE: &str = ".workswitch_mode";

/// File layout of the slot and marker files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub state_dir: PathBuf,
    pub work_file: String,
    pub personal_file: String,
    pub mode_marker_file: String,
}

impl StoreConfig {
    /// Default file names inside `state_dir`.
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            work_file: DEFAULT_WORK_FILE.to_string(),
            personal_file: DEFAULT_PERSONAL_FILE.to_string(),
            mode_marker_file: DEFAULT_MODE_MARKER_FILE.to_string(),
        }
    }
}

pub struct ProfileStore {
    config: StoreConfig,
}

impl ProfileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self, slot: Slot) -> PathBuf {
        let file = match slot {
            Slot::Work => &self.config.work_file,
            Slot::Personal => &self.config.personal_file,
        };
        self.config.state_dir.join(file)
    }

    pub fn marker_path(&self) -> PathBuf {
        self.config.state_dir.join(&self.config.mode_marker_file)
    }

    /// Load the snapshot for `slot`. `None` means nothing was ever saved.
    pub fn load(&self, slot: Slot) -> Result<Option<ProfileSnapshot>> {
        let path = self.path(slot);
        if !path.exists() {
            debug!(%slot, path = %path.display(), "No saved state");
            return Ok(None);
        }

        let content = read(&path)?;
        if content.trim().is_empty() {
            warn!(%slot, path = %path.display(), "Saved state is empty, ignoring it");
            return Ok(None);
        }

        let snapshot = serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        Ok(Some(snapshot))
    }

    /// Overwrite the slot file with `snapshot`. Bumps the file's mtime.
    pub fn save(&self, slot: Slot, snapshot: &ProfileSnapshot) -> Result<()> {
        let path = self.path(slot);
        self.ensure_state_dir()?;

        let content = serde_json::to_string_pretty(snapshot).map_err(|source| {
            StoreError::Json {
                path: path.clone(),
                source,
            }
        })?;
        write(&path, &content)?;

        debug!(
            %slot,
            path = %path.display(),
            apps = snapshot.running_apps.len(),
            tabs = snapshot.chrome_tabs.len(),
            "Saved profile state"
        );
        Ok(())
    }

    /// Modification time of the slot file, if it exists.
    pub fn modified(&self, slot: Slot) -> Option<SystemTime> {
        fs::metadata(self.path(slot))
            .and_then(|m| m.modified())
            .ok()
    }

    /// The slot recorded by the last completed switch, if any.
    pub fn read_marker(&self) -> Option<Slot> {
        let path = self.marker_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), "Cannot read mode marker: {}", e);
                return None;
            }
        };
        match content.parse::<Slot>() {
            Ok(slot) => Some(slot),
            Err(e) => {
                warn!(path = %path.display(), "Ignoring mode marker: {}", e);
                None
            }
        }
    }

    pub fn write_marker(&self, slot: Slot) -> Result<()> {
        self.ensure_state_dir()?;
        write(&self.marker_path(), slot.as_str())
    }

    fn ensure_state_dir(&self) -> Result<()> {
        let dir = &self.config.state_dir;
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
