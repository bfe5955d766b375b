//! Save the current session as personal and restore the work profile.

use workswitch::cli::{self, Flow};
use workswitch::profile::Slot;

fn main() {
    cli::exit_on_error(cli::run_standalone(Flow::Restore(Slot::Work)));
}
