//! Scripted automation backend that records every command it receives.

use std::cell::RefCell;
use std::collections::HashSet;

use super::error::{AutomationError, Result};
use super::Automation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ForegroundApps,
    BrowserTabs,
    CloseBrowserWindows,
    OpenBrowserWindow,
    OpenTab(String),
    LaunchApp(String),
}

#[derive(Debug, Default)]
pub struct FakeAutomation {
    apps: Vec<String>,
    tabs: Vec<String>,
    missing_apps: HashSet<String>,
    fail_enumeration: bool,
    calls: RefCell<Vec<Call>>,
}

impl FakeAutomation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_apps(mut self, apps: &[&str]) -> Self {
        self.apps = apps.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_tabs(mut self, tabs: &[&str]) -> Self {
        self.tabs = tabs.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Launching any of these apps fails with `AppNotFound`.
    pub fn with_missing_apps(mut self, apps: &[&str]) -> Self {
        self.missing_apps = apps.iter().map(|s| s.to_string()).collect();
        self
    }

    /// App and tab enumeration fail instead of returning the scripted lists.
    pub fn failing_enumeration(mut self) -> Self {
        self.fail_enumeration = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn opened_tabs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::OpenTab(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn launched_apps(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::LaunchApp(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Automation for FakeAutomation {
    fn foreground_apps(&self) -> Result<Vec<String>> {
        self.record(Call::ForegroundApps);
        if self.fail_enumeration {
            return Err(AutomationError::CommandFailed(
                "System Events access denied".to_string(),
            ));
        }
        Ok(self.apps.clone())
    }

    fn browser_tabs(&self) -> Result<Vec<String>> {
        self.record(Call::BrowserTabs);
        if self.fail_enumeration {
            return Err(AutomationError::CommandFailed(
                "browser is not running".to_string(),
            ));
        }
        Ok(self.tabs.clone())
    }

    fn close_browser_windows(&self) -> Result<()> {
        self.record(Call::CloseBrowserWindows);
        Ok(())
    }

    fn open_browser_window(&self) -> Result<()> {
        self.record(Call::OpenBrowserWindow);
        Ok(())
    }

    fn open_tab(&self, url: &str) -> Result<()> {
        self.record(Call::OpenTab(url.to_string()));
        Ok(())
    }

    fn launch_app(&self, name: &str) -> Result<()> {
        self.record(Call::LaunchApp(name.to_string()));
        if self.missing_apps.contains(name) {
            return Err(AutomationError::AppNotFound(name.to_string()));
        }
        Ok(())
    }
}
