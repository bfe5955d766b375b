//! macOS automation through `osascript` and `open`

use std::process::Command;

use tracing::debug;

use super::error::{AutomationError, Result};
use super::{parse_applescript_lines, Automation};

#[derive(Debug, Clone)]
pub struct AppleScript {
    browser: String,
}

impl AppleScript {
    pub fn new(browser: &str) -> Self {
        Self {
            browser: browser.to_string(),
        }
    }

    fn run_script(&self, script: &str) -> Result<String> {
        debug!(script, "Running AppleScript");
        let output = Command::new("osascript").args(["-e", script]).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AutomationError::CommandFailed(format!(
                "osascript: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn tell_browser(&self, body: &str) -> String {
        format!(
            "tell application {}\n{}\nend tell",
            quote(&self.browser),
            body
        )
    }
}

impl Automation for AppleScript {
    fn foreground_apps(&self) -> Result<Vec<String>> {
        let stdout = self.run_script(&foreground_apps_script())?;
        Ok(parse_applescript_lines(&stdout))
    }

    fn browser_tabs(&self) -> Result<Vec<String>> {
        let stdout = self.run_script(&browser_tabs_script(&self.browser))?;
        Ok(parse_applescript_lines(&stdout))
    }

    fn close_browser_windows(&self) -> Result<()> {
        self.run_script(&self.tell_browser("close every window"))?;
        Ok(())
    }

    fn open_browser_window(&self) -> Result<()> {
        self.run_script(&self.tell_browser("make new window\nactivate"))?;
        Ok(())
    }

    fn open_tab(&self, url: &str) -> Result<()> {
        debug!(url, browser = %self.browser, "Opening tab");
        let output = Command::new("open")
            .args(["-a", &self.browser, url])
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AutomationError::CommandFailed(format!(
                "open {}: {}",
                url,
                stderr.trim()
            )));
        }

        Ok(())
    }

    fn launch_app(&self, name: &str) -> Result<()> {
        debug!(app = name, "Launching application");
        let output = Command::new("open").args(["-a", name]).output()?;

        if !output.status.success() {
            return Err(AutomationError::AppNotFound(name.to_string()));
        }

        Ok(())
    }
}

/// Return `list_var` from a script as text, one item per line.
fn return_as_lines(list_var: &str) -> String {
    format!(
        "set AppleScript's text item delimiters to linefeed\nreturn {} as text",
        list_var
    )
}

fn foreground_apps_script() -> String {
    format!(
        "tell application \"System Events\" to set appList to name of every application process whose background only is false\n{}",
        return_as_lines("appList")
    )
}

fn browser_tabs_script(browser: &str) -> String {
    // Guarded so that listing tabs never launches the browser.
    format!(
        "if application {name} is not running then return \"\"\n\
         tell application {name}\n\
         set tabList to {{}}\n\
         repeat with theWindow in every window\n\
         set tabList to tabList & (URL of every tab of theWindow)\n\
         end repeat\n\
         end tell\n\
         {result}",
        name = quote(browser),
        result = return_as_lines("tabList")
    )
}

/// Quote a value as an AppleScript string literal.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
