//! Top-level error type for the `tasklist` binary.

use std::path::PathBuf;
use tasklist_runtime::StoreError;
use thiserror::Error;

/// Errors that end a session
#[derive(Error, Debug)]
pub enum TaskListError {
    /// Reading terminal events or drawing failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The store rejected an action or did not shut down cleanly
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The log file could not be opened
    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        /// The configured log file
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// A global tracing subscriber was already installed
    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
