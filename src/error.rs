use std::{path::PathBuf, time::Duration};

use switex_core::UnknownLayout;
use thiserror::Error;

/// Failures of the OS capability layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The backend for a capability is not available on this system.
    #[error("{capability} is not available: {reason}")]
    CapabilityMissing {
        capability: &'static str,
        reason: String,
    },

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("key simulation failed: {0}")]
    Input(String),

    #[error("hotkey registration failed: {0}")]
    Hotkey(String),

    #[error("layout query failed: {0}")]
    Layout(String),
}

impl PlatformError {
    pub fn missing(capability: &'static str, reason: impl Into<String>) -> Self {
        Self::CapabilityMissing {
            capability,
            reason: reason.into(),
        }
    }
}

/// Why a clipboard round trip was aborted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoundTripError {
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("selection was not copied within {}ms", .0.as_millis())]
    SelectionCaptureTimeout(Duration),

    #[error("writing the converted text failed: {0}")]
    ClipboardWrite(String),

    #[error("key simulation failed: {0}")]
    KeySimulation(String),

    /// Another writer replaced the converted text before paste.
    #[error("clipboard changed before paste")]
    ClipboardRaced,
}

impl RoundTripError {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundTripError::ClipboardUnavailable(_) => "clipboard_unavailable",
            RoundTripError::SelectionCaptureTimeout(_) => "selection_capture_timeout",
            RoundTripError::ClipboardWrite(_) => "clipboard_write",
            RoundTripError::KeySimulation(_) => "key_simulation",
            RoundTripError::ClipboardRaced => "clipboard_raced",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid hotkey '{value}': {reason}")]
    InvalidHotkey { value: String, reason: String },

    #[error(transparent)]
    UnknownLayout(#[from] UnknownLayout),

    #[error("default_target cannot be 'en'; pick the layout English text is converted to")]
    EnglishDefaultTarget,

    #[error("{field} must be greater than 0")]
    Zero { field: &'static str },

    #[error("{field} must be at most {max_ms}ms, got {value_ms}ms")]
    TooLarge {
        field: &'static str,
        value_ms: u64,
        max_ms: u64,
    },

    #[error("poll_interval_ms ({poll_ms}) must be shorter than capture_timeout_ms ({timeout_ms})")]
    PollNotBelowTimeout { poll_ms: u64, timeout_ms: u64 },

    #[error("no config directory could be determined: {0}")]
    NoConfigDir(String),

    #[error("failed to load config {path}: {}", causes(.source))]
    Load {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("failed to store config {path}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },
}

/// Top-level error of one CLI invocation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    UnknownLayout(#[from] UnknownLayout),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    RoundTrip(#[from] RoundTripError),

    #[error("clipboard is empty")]
    ClipboardEmpty,

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// `err` followed by each of its sources, joined with `": "`.
fn causes(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut next = err.source();
    while let Some(cause) = next {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        next = cause.source();
    }
    out
}
