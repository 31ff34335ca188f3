//! Error types for the Menuhub client core.
//!
//! This module defines the centralized error type [`MenuhubError`] and a type alias
//! [`Result`] used throughout the crate. Errors carry owned strings rather than
//! wrapped source errors so they can be cloned into events (a failed fetch travels
//! back into the page handler as data) and compared in tests.

use thiserror::Error;

/// The main error type for Menuhub operations.
///
/// Every variant is recoverable: the presentation layer surfaces it and the user
/// retries. None of them is fatal to the process.
///
/// # Examples
///
/// ```
/// use menuhub::MenuhubError;
///
/// let err = MenuhubError::validation("city", "city is required");
/// assert_eq!(err.to_string(), "Validation error on city: city is required");
/// assert!(err.is_local());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuhubError {
    /// Token acquisition failed.
    ///
    /// Propagated to the caller untouched; the core never retries it.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A form invariant was violated before any network call.
    ///
    /// `field` is the form field path (`menuItems[1].price`, `imageFile`, ...)
    /// so the presentation layer can attach the message to the right input.
    #[error("Validation error on {field}: {message}")]
    Validation {
        /// Form field path the failure belongs to.
        field: String,
        /// Human-readable reason.
        message: String,
    },

    /// Non-success response or network failure.
    ///
    /// `status` is `None` when no response arrived at all.
    #[error("Transport error{}: {message}", status_suffix(.status))]
    Transport {
        /// HTTP status code, when the server answered.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },

    /// The requested resource does not exist.
    ///
    /// Fetching the caller's own restaurant turns a 404 into "create mode" instead;
    /// any other endpoint answering 404 yields this.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A submit was attempted while another one for the same form is outstanding.
    #[error("A submit is already in progress")]
    SubmitInFlight,

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem I/O failed (configuration files, image uploads, trace files).
    #[error("IO error: {0}")]
    Io(String),
}

impl MenuhubError {
    /// Builds a [`MenuhubError::Validation`] for `field`.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a [`MenuhubError::Transport`].
    #[must_use]
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Returns `true` for failures detected locally, before anything was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::SubmitInFlight)
    }
}

impl From<std::io::Error> for MenuhubError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// A specialized `Result` type for Menuhub operations.
pub type Result<T> = std::result::Result<T, MenuhubError>;
