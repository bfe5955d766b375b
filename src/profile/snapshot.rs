//! The record persisted for a profile slot

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// `datetime.isoformat()`-style local time, which older state files use.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(default)]
    pub timestamp: String,

    #[serde(default)]
    pub running_apps: Vec<String>,

    /// Tab URLs across all browser windows, in window order.
    #[serde(default)]
    pub chrome_tabs: Vec<String>,
}

impl ProfileSnapshot {
    /// Build a snapshot stamped with the current local time.
    pub fn new(running_apps: Vec<String>, chrome_tabs: Vec<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string(),
            running_apps,
            chrome_tabs,
        }
    }

    /// Parse `timestamp`, accepting both offset-less and RFC 3339 forms.
    pub fn captured_at(&self) -> Option<NaiveDateTime> {
        if let Ok(ts) = NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(ts);
        }
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Local).naive_local())
    }

    pub fn is_empty(&self) -> bool {
        self.running_apps.is_empty() && self.chrome_tabs.is_empty()
    }
}
