//! Save the current session and start a blank, unsaved one.

use workswitch::cli::{self, Flow};

fn main() {
    cli::exit_on_error(cli::run_standalone(Flow::Sandbox));
}
