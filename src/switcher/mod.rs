//! The switch flows: save the outgoing session, clear the browser, then
//! restore a profile or start a sandbox session.
//!
//! Nothing destructive happens before the outgoing snapshot is on disk. If a
//! later step fails the error is returned as-is; steps already taken (closed
//! windows) are not undone.

pub mod confirm;

pub use confirm::{AssumeYes, Confirm, TerminalPrompt};

use anyhow::{Context, Result};
use std::fmt;
use tracing::{debug, warn};

use crate::automation::Automation;
use crate::inspector::EnvironmentInspector;
use crate::profile::{ModeDetector, ProfileStore, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchTarget {
    Profile(Slot),
    Sandbox,
}

impl fmt::Display for SwitchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchTarget::Profile(slot) => write!(f, "{}", slot),
            SwitchTarget::Sandbox => f.write_str("sandbox"),
        }
    }
}

/// What a switch is about to do, shown to the user before anything happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchPlan {
    pub from: Slot,
    pub to: SwitchTarget,
    pub browser: String,
}

impl SwitchPlan {
    pub fn target_label(&self) -> String {
        self.to.to_string()
    }

    pub fn steps(&self) -> Vec<String> {
        match self.to {
            SwitchTarget::Profile(slot) => vec![
                "Save your current session state".to_string(),
                format!("Close all {} windows", self.browser),
                format!("Restore your previous {} session", slot),
            ],
            SwitchTarget::Sandbox => vec![
                format!("Save your current {} session state", self.from),
                format!("Close all {} windows", self.browser),
                "Start a fresh session with no saved state".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    Idle,
    Confirming,
    DetectingMode,
    SavingOutgoing,
    ClosingBrowser,
    Restoring,
    OpeningFresh,
    Done,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The user declined; nothing was saved, closed or opened.
    Cancelled,
    Restored {
        saved_as: Slot,
        target: Slot,
        tabs_opened: usize,
        tabs_failed: Vec<String>,
        apps_launched: Vec<String>,
        apps_failed: Vec<String>,
    },
    /// The target slot had nothing saved.
    FreshSession { saved_as: Slot, target: Slot },
    Sandbox { saved_as: Slot },
}

impl SwitchOutcome {
    pub fn final_state(&self) -> SwitchState {
        match self {
            SwitchOutcome::Cancelled => SwitchState::Cancelled,
            _ => SwitchState::Done,
        }
    }

    pub fn saved_as(&self) -> Option<Slot> {
        match self {
            SwitchOutcome::Cancelled => None,
            SwitchOutcome::Restored { saved_as, .. }
            | SwitchOutcome::FreshSession { saved_as, .. }
            | SwitchOutcome::Sandbox { saved_as } => Some(*saved_as),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwitchOptions {
    pub browser: String,
    /// Pick the outgoing slot with the mode detector instead of assuming it
    /// is the opposite of the target.
    pub detect_outgoing: bool,
    pub use_mode_marker: bool,
}

impl Default for SwitchOptions {
    fn default() -> Self {
        Self {
            browser: crate::automation::DEFAULT_BROWSER.to_string(),
            detect_outgoing: false,
            use_mode_marker: true,
        }
    }
}

pub struct Switcher<'a> {
    store: &'a ProfileStore,
    automation: &'a dyn Automation,
    options: SwitchOptions,
}

impl<'a> Switcher<'a> {
    pub fn new(
        store: &'a ProfileStore,
        automation: &'a dyn Automation,
        options: SwitchOptions,
    ) -> Self {
        Self {
            store,
            automation,
            options,
        }
    }

    fn detector(&self) -> ModeDetector<'a> {
        ModeDetector::new(self.store, self.options.use_mode_marker)
    }

    /// The slot the current session gets saved into when switching to `target`.
    pub fn outgoing_slot(&self, target: Slot) -> Slot {
        if self.options.detect_outgoing {
            self.detector().current_mode()
        } else {
            target.other()
        }
    }

    /// Save the current session, close the browser and restore `target`.
    pub fn switch_to(&self, target: Slot, confirm: &mut dyn Confirm) -> Result<SwitchOutcome> {
        let mut state = SwitchState::Idle;
        let outgoing = self.outgoing_slot(target);

        advance(&mut state, SwitchState::Confirming);
        let plan = SwitchPlan {
            from: outgoing,
            to: SwitchTarget::Profile(target),
            browser: self.options.browser.clone(),
        };
        if !confirm.confirm(&plan)? {
            advance(&mut state, SwitchState::Cancelled);
            return Ok(SwitchOutcome::Cancelled);
        }

        advance(&mut state, SwitchState::SavingOutgoing);
        self.save_outgoing(outgoing)?;

        advance(&mut state, SwitchState::ClosingBrowser);
        self.close_browser();

        advance(&mut state, SwitchState::Restoring);
        let outcome = match self
            .store
            .load(target)
            .with_context(|| format!("Failed to load the saved {} profile", target))?
        {
            Some(snapshot) => {
                let mut tabs_opened = 0;
                let mut tabs_failed = Vec::new();
                for url in &snapshot.chrome_tabs {
                    match self.automation.open_tab(url) {
                        Ok(()) => tabs_opened += 1,
                        Err(e) => {
                            warn!(url = %url, "Could not open tab: {}", e);
                            tabs_failed.push(url.clone());
                        }
                    }
                }

                let mut apps_launched = Vec::new();
                let mut apps_failed = Vec::new();
                for app in &snapshot.running_apps {
                    match self.automation.launch_app(app) {
                        Ok(()) => apps_launched.push(app.clone()),
                        Err(e) => {
                            warn!(app = %app, "Could not open application: {}", e);
                            apps_failed.push(app.clone());
                        }
                    }
                }

                SwitchOutcome::Restored {
                    saved_as: outgoing,
                    target,
                    tabs_opened,
                    tabs_failed,
                    apps_launched,
                    apps_failed,
                }
            }
            None => SwitchOutcome::FreshSession {
                saved_as: outgoing,
                target,
            },
        };

        self.mark_active(target);
        advance(&mut state, SwitchState::Done);
        Ok(outcome)
    }

    /// Save the current session to whichever profile is active, then open a
    /// single blank browser window. The new session is never saved.
    pub fn start_sandbox(&self, confirm: &mut dyn Confirm) -> Result<SwitchOutcome> {
        let mut state = SwitchState::Idle;

        advance(&mut state, SwitchState::DetectingMode);
        let current = self.detector().current_mode();

        advance(&mut state, SwitchState::Confirming);
        let plan = SwitchPlan {
            from: current,
            to: SwitchTarget::Sandbox,
            browser: self.options.browser.clone(),
        };
        if !confirm.confirm(&plan)? {
            advance(&mut state, SwitchState::Cancelled);
            return Ok(SwitchOutcome::Cancelled);
        }

        advance(&mut state, SwitchState::SavingOutgoing);
        self.save_outgoing(current)?;

        advance(&mut state, SwitchState::ClosingBrowser);
        self.close_browser();

        advance(&mut state, SwitchState::OpeningFresh);
        if let Err(e) = self.automation.open_browser_window() {
            warn!("Could not open a new browser window: {}", e);
        }

        advance(&mut state, SwitchState::Done);
        Ok(SwitchOutcome::Sandbox { saved_as: current })
    }

    fn save_outgoing(&self, slot: Slot) -> Result<()> {
        let snapshot = EnvironmentInspector::new(self.automation).capture();
        self.store
            .save(slot, &snapshot)
            .with_context(|| format!("Failed to save the current session as {}", slot))
    }

    fn close_browser(&self) {
        if let Err(e) = self.automation.close_browser_windows() {
            warn!("Could not close browser windows: {}", e);
        }
    }

    fn mark_active(&self, slot: Slot) {
        if !self.options.use_mode_marker {
            return;
        }
        if let Err(e) = self.store.write_marker(slot) {
            warn!("Could not record the active profile: {}", e);
        }
    }
}

fn advance(state: &mut SwitchState, next: SwitchState) {
    debug!(from = ?state, to = ?next, "Switch state");
    *state = next;
}
