//! Best-effort view of what is running on the desktop right now

use tracing::warn;

use crate::automation::Automation;
use crate::profile::ProfileSnapshot;

pub struct EnvironmentInspector<'a> {
    automation: &'a dyn Automation,
}

impl<'a> EnvironmentInspector<'a> {
    pub fn new(automation: &'a dyn Automation) -> Self {
        Self { automation }
    }

    /// Foreground application names, or empty if the OS query fails.
    pub fn list_foreground_apps(&self) -> Vec<String> {
        self.automation.foreground_apps().unwrap_or_else(|e| {
            warn!("Could not list running applications: {}", e);
            Vec::new()
        })
    }

    /// Tab URLs across all browser windows, or empty if the browser can't be asked.
    pub fn list_browser_tabs(&self) -> Vec<String> {
        self.automation.browser_tabs().unwrap_or_else(|e| {
            warn!("Could not list browser tabs: {}", e);
            Vec::new()
        })
    }

    pub fn capture(&self) -> ProfileSnapshot {
        ProfileSnapshot::new(self.list_foreground_apps(), self.list_browser_tabs())
    }
}
