use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutomationError {
    #[error(
        "Desktop automation is not supported on this platform.\n\
         workswitch drives applications through AppleScript and needs macOS."
    )]
    Unsupported,

    #[error("Application not found: {0}")]
    AppNotFound(String),

    #[error("Automation command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AutomationError>;
