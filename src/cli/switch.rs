//! `workswitch work|personal|sandbox` command implementation

use anyhow::{Context, Result};
use std::io::{self, Write};

use super::{capitalize, AppContext};
use crate::profile::Slot;
use crate::switcher::{AssumeYes, Confirm, SwitchOutcome, Switcher, TerminalPrompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Restore(Slot),
    Sandbox,
}

impl Flow {
    fn failure_context(&self) -> String {
        match self {
            Flow::Restore(slot) => format!("Error restoring {} state", slot),
            Flow::Sandbox => "Error starting sandbox session".to_string(),
        }
    }
}

pub fn run(ctx: &AppContext, flow: Flow, yes: bool) -> Result<()> {
    let mut confirm: Box<dyn Confirm> = if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalPrompt::stdio())
    };

    execute(
        &ctx.switcher(),
        flow,
        confirm.as_mut(),
        &mut io::stdout().lock(),
    )?;
    Ok(())
}

/// Run `flow` and write its report to `out`.
pub fn execute<W: Write>(
    switcher: &Switcher<'_>,
    flow: Flow,
    confirm: &mut dyn Confirm,
    out: &mut W,
) -> Result<SwitchOutcome> {
    let outcome = match flow {
        Flow::Restore(slot) => switcher.switch_to(slot, confirm),
        Flow::Sandbox => switcher.start_sandbox(confirm),
    }
    .with_context(|| flow.failure_context())?;

    report(out, &outcome)?;
    Ok(outcome)
}

pub fn report<W: Write>(out: &mut W, outcome: &SwitchOutcome) -> io::Result<()> {
    if let Some(saved_as) = outcome.saved_as() {
        writeln!(out, "Saved current state as {} profile", saved_as)?;
    }

    match outcome {
        SwitchOutcome::Cancelled => {
            writeln!(out, "Switch cancelled. Maintaining current session.")?;
        }
        SwitchOutcome::Restored {
            target,
            tabs_opened,
            tabs_failed,
            apps_launched,
            apps_failed,
            ..
        } => {
            for url in tabs_failed {
                writeln!(out, "Could not open tab {}", url)?;
            }
            for app in apps_failed {
                writeln!(out, "Could not open {}", app)?;
            }
            writeln!(
                out,
                "{} profile restored successfully! ({} tabs, {} apps)",
                capitalize(target.as_str()),
                tabs_opened,
                apps_launched.len()
            )?;
        }
        SwitchOutcome::FreshSession { target, .. } => {
            writeln!(
                out,
                "No saved {target} state found. Starting fresh {target} session."
            )?;
        }
        SwitchOutcome::Sandbox { .. } => {
            writeln!(out, "Started fresh sandbox session!")?;
            writeln!(out, "Note: This session's state will not be saved.")?;
        }
    }

    Ok(())
}
