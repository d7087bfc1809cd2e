//! Unified error type for the notiled-lib crate.
//!
//! [`NotiledError`] covers the request-level failures (`UnsupportedMode`,
//! `InvalidColor`, `NotSupported`), configuration problems, and sysfs I/O
//! failures. I/O errors carry the path they happened on so a dead channel
//! can be identified from the log line alone.

use std::fmt;
use std::path::PathBuf;

/// Unified error type for notiled-lib operations.
#[derive(Debug)]
pub enum NotiledError {
    /// The requested LED mode is neither manual nor blink, or the LED
    /// cannot render it (single-color LEDs reject blink).
    UnsupportedMode(String),
    /// A color value or color string could not be interpreted.
    InvalidColor(String),
    /// A sysfs read or write failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Unknown LED device id.
    NotSupported(String),
    /// Configuration validation error.
    Config(String),
    /// The event loop owning the LED has shut down.
    Disconnected,
}

impl NotiledError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NotiledError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for NotiledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotiledError::UnsupportedMode(e) => write!(f, "Unsupported mode: {e}"),
            NotiledError::InvalidColor(e) => write!(f, "Color error: {e}"),
            NotiledError::Io { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
            NotiledError::NotSupported(e) => write!(f, "Not supported: {e}"),
            NotiledError::Config(e) => write!(f, "Config error: {e}"),
            NotiledError::Disconnected => write!(f, "LED event loop is not running"),
        }
    }
}

impl std::error::Error for NotiledError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotiledError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Crate-level Result alias using [`NotiledError`].
pub type Result<T> = std::result::Result<T, NotiledError>;
