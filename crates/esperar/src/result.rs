//! Result and error types for Esperar.

use thiserror::Error;

/// Result type for Esperar operations
pub type EsperarResult<T> = Result<T, EsperarError>;

/// Errors surfaced to test code.
///
/// Transient driver hiccups (stale element references, momentary transport
/// failures) never appear here; the poller absorbs them and retries. Every
/// variant below is raised to the immediate caller and is expected to fail
/// the test with the message intact.
#[derive(Debug, Error)]
pub enum EsperarError {
    /// No satisfying poll tick occurred before the deadline
    #[error("timed out after {ms}ms waiting for {condition}")]
    Timeout {
        /// Description of the unsatisfied condition (locator, required text)
        condition: String,
        /// The elapsed timeout in milliseconds
        ms: u64,
    },

    /// More than one element satisfied criteria that required a unique match.
    /// A selector-authoring bug, not a timing issue; never retried.
    #[error("found more than one {condition}; make the selector more specific or use get_elements")]
    AmbiguousMatch {
        /// Description of the over-matched criteria (locator, required text)
        condition: String,
    },

    /// Scroll step of zero pixels; rejected at construction, before any tick
    #[error("scroll step must be a non-zero number of pixels")]
    InvalidScrollStep,

    /// Browser launch error
    #[error("failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Page-level error outside the retry loop (script failure, lost session)
    #[error("page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<crate::driver::DriverError> for EsperarError {
    fn from(err: crate::driver::DriverError) -> Self {
        Self::Page {
            message: err.to_string(),
        }
    }
}
