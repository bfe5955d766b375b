//! workswitch - save and restore work/personal desktop sessions

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use workswitch::cli::{self, AppContext, Cli, Commands, Flow};
use workswitch::profile::Slot;

fn main() {
    cli::exit_on_error(run());
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Completions need neither config nor state files.
    if let Commands::Completion { shell } = cli.command {
        generate(shell, &mut Cli::command(), "workswitch", &mut std::io::stdout());
        return Ok(());
    }

    cli::init_logging();
    let ctx = AppContext::load(cli.state_dir.as_deref())?;

    match cli.command {
        Commands::Work => cli::switch::run(&ctx, Flow::Restore(Slot::Work), cli.yes),
        Commands::Personal => cli::switch::run(&ctx, Flow::Restore(Slot::Personal), cli.yes),
        Commands::Sandbox => cli::switch::run(&ctx, Flow::Sandbox, cli.yes),
        Commands::Status(args) => cli::status::run(&ctx, args),
        Commands::Completion { .. } => unreachable!(),
    }
}
