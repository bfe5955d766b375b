//! Command-line definition for the `workswitch` binary

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::status::StatusArgs;

#[derive(Parser)]
#[command(name = "workswitch")]
#[command(about = "Save and restore work/personal desktop sessions")]
#[command(version)]
pub struct Cli {
    /// Directory holding the profile state files (defaults to your home directory)
    #[arg(long, global = true, env = "WORKSWITCH_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save the current session as personal and restore the work profile
    #[command(alias = "go-work")]
    Work,

    /// Save the current session as work and restore the personal profile
    Personal,

    /// Save the current session and start a blank, unsaved one
    Sandbox,

    /// Show the active profile and what each slot holds
    Status(StatusArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
