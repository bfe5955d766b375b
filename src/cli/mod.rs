//! CLI command implementations

pub mod definition;
pub mod status;
pub mod switch;

pub use definition::{Cli, Commands};
pub use switch::Flow;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::automation::{default_automation, Automation};
use crate::profile::{Config, ModeDetector, ProfileStore};
use crate::switcher::{SwitchOptions, Switcher};

pub const DEBUG_ENV: &str = "WORKSWITCH_DEBUG";
pub const STATE_DIR_ENV: &str = "WORKSWITCH_STATE_DIR";

/// Log to stderr: debug for this crate when `WORKSWITCH_DEBUG` is set,
/// warnings only otherwise.
pub fn init_logging() {
    let filter = if std::env::var(DEBUG_ENV).is_ok() {
        "workswitch=debug"
    } else {
        "workswitch=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Everything a command needs, resolved once from config and overrides.
pub struct AppContext {
    pub config: Config,
    pub store: ProfileStore,
    pub automation: Box<dyn Automation>,
}

impl AppContext {
    pub fn load(state_dir: Option<&Path>) -> Result<Self> {
        let config = Config::load()?;
        let store = ProfileStore::new(config.store_config(state_dir)?);
        let automation = default_automation(&config.browser.name);
        Ok(Self {
            config,
            store,
            automation,
        })
    }

    pub fn switch_options(&self) -> SwitchOptions {
        SwitchOptions {
            browser: self.config.browser.name.clone(),
            detect_outgoing: self.config.switch.detect_outgoing,
            use_mode_marker: self.config.storage.use_mode_marker,
        }
    }

    pub fn switcher(&self) -> Switcher<'_> {
        Switcher::new(&self.store, self.automation.as_ref(), self.switch_options())
    }

    pub fn detector(&self) -> ModeDetector<'_> {
        ModeDetector::new(&self.store, self.config.storage.use_mode_marker)
    }
}

/// Entry point for the zero-argument `go-work` and `sandbox` binaries.
pub fn run_standalone(flow: Flow) -> Result<()> {
    init_logging();
    let state_dir = std::env::var_os(STATE_DIR_ENV).map(PathBuf::from);
    let ctx = AppContext::load(state_dir.as_deref())?;
    switch::run(&ctx, flow, false)
}

/// Render an error with its whole cause chain, e.g.
/// `Error: Error restoring work state: Failed to access ...`.
pub fn format_error(err: &anyhow::Error) -> String {
    format!("Error: {:#}", err)
}

/// Exit with status 1 after printing the error, if there is one.
pub fn exit_on_error(result: Result<()>) {
    if let Err(err) = result {
        eprintln!("{}", format_error(&err));
        std::process::exit(1);
    }
}

/// Capitalize the first letter, for messages that start with a slot name.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
