//! Confirmation before a switch closes anything

use anyhow::Result;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use super::SwitchPlan;

pub trait Confirm {
    /// Ask whether `plan` should go ahead. `false` cancels the switch.
    fn confirm(&mut self, plan: &SwitchPlan) -> Result<bool>;
}

/// Accepts every plan without asking (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _plan: &SwitchPlan) -> Result<bool> {
        Ok(true)
    }
}

/// Prints the plan and keeps asking until it gets a yes or a no.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, plan: &SwitchPlan) -> Result<bool> {
        writeln!(
            self.output,
            "\nPreparing to switch from {} mode to {} mode.",
            plan.from,
            plan.target_label()
        )?;
        writeln!(self.output, "This will:")?;
        for (i, step) in plan.steps().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, step)?;
        }

        loop {
            write!(self.output, "\nDo you want to proceed? (yes/no): ")?;
            self.output.flush()?;

            let mut response = String::new();
            if self.input.read_line(&mut response)? == 0 {
                // stdin closed
                writeln!(self.output)?;
                return Ok(false);
            }

            match parse_answer(&response) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.output, "Please answer 'yes' or 'no'")?,
            }
        }
    }
}

fn parse_answer(response: &str) -> Option<bool> {
    match response.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}
