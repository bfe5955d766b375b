//! OS and browser automation backends

pub mod error;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use error::{AutomationError, Result};

pub const DEFAULT_BROWSER: &str = "Google Chrome";

/// The commands the switch flows need from the desktop.
///
/// Every call blocks until the underlying command exits. Implementations
/// report failures; deciding which failures are fatal is left to callers.
pub trait Automation {
    /// Display names of all application processes that are not background-only.
    fn foreground_apps(&self) -> Result<Vec<String>>;

    /// URLs of every tab across every window of the browser, window by window.
    fn browser_tabs(&self) -> Result<Vec<String>>;

    fn close_browser_windows(&self) -> Result<()>;

    /// Open a blank browser window and bring the browser to the front.
    fn open_browser_window(&self) -> Result<()>;

    fn open_tab(&self, url: &str) -> Result<()>;

    fn launch_app(&self, name: &str) -> Result<()>;
}

/// Backend for platforms without AppleScript. Every command fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsupported;

impl Automation for Unsupported {
    fn foreground_apps(&self) -> Result<Vec<String>> {
        Err(AutomationError::Unsupported)
    }

    fn browser_tabs(&self) -> Result<Vec<String>> {
        Err(AutomationError::Unsupported)
    }

    fn close_browser_windows(&self) -> Result<()> {
        Err(AutomationError::Unsupported)
    }

    fn open_browser_window(&self) -> Result<()> {
        Err(AutomationError::Unsupported)
    }

    fn open_tab(&self, _url: &str) -> Result<()> {
        Err(AutomationError::Unsupported)
    }

    fn launch_app(&self, _name: &str) -> Result<()> {
        Err(AutomationError::Unsupported)
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "macos")] {
        mod macos;
        pub use macos::AppleScript;

        /// Pick the automation backend for the platform we were built for.
        pub fn default_automation(browser: &str) -> Box<dyn Automation> {
            Box::new(AppleScript::new(browser))
        }
    } else {
        /// Pick the automation backend for the platform we were built for.
        pub fn default_automation(_browser: &str) -> Box<dyn Automation> {
            Box::new(Unsupported)
        }
    }
}

/// Split `osascript` output into one item per line.
///
/// The scripts join their lists with linefeeds rather than AppleScript's
/// default `", "`, since URLs may contain commas. Items are trimmed, and empty
/// lines and `missing value` placeholders are dropped.
pub fn parse_applescript_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|item| !item.is_empty() && *item != "missing value")
        .map(str::to_string)
        .collect()
}
