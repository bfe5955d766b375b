//! Working out which profile is currently active

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use super::{ProfileStore, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSource {
    /// Read from the marker written by the last completed switch.
    Marker,
    /// Inferred from which slot file was written most recently.
    Timestamps,
}

pub struct ModeDetector<'a> {
    store: &'a ProfileStore,
    use_marker: bool,
}

impl<'a> ModeDetector<'a> {
    pub fn new(store: &'a ProfileStore, use_marker: bool) -> Self {
        Self { store, use_marker }
    }

    pub fn current_mode(&self) -> Slot {
        self.detect().0
    }

    pub fn detect(&self) -> (Slot, ModeSource) {
        if self.use_marker {
            if let Some(slot) = self.store.read_marker() {
                debug!(%slot, "Mode taken from marker");
                return (slot, ModeSource::Marker);
            }
        }

        let slot = self.detect_from_timestamps();
        debug!(%slot, "Mode inferred from state file timestamps");
        (slot, ModeSource::Timestamps)
    }

    pub fn detect_from_timestamps(&self) -> Slot {
        mode_from_times(
            self.store.modified(Slot::Work),
            self.store.modified(Slot::Personal),
        )
    }
}

/// `Work` only when the work file is strictly newer. A missing file counts as
/// the epoch, so ties and "neither exists" both land on `Personal`.
pub fn mode_from_times(work: Option<SystemTime>, personal: Option<SystemTime>) -> Slot {
    let work = work.unwrap_or(UNIX_EPOCH);
    let personal = personal.unwrap_or(UNIX_EPOCH);

    if work > personal {
        Slot::Work
    } else {
        Slot::Personal
    }
}
