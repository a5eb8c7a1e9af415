//! Crate error types.
//!
//! Only the boundaries can fail: reading or writing the settings file and
//! verifying that the host supplied every asset the core refers to. Gameplay
//! failure (crashing into a hazard, drifting off the path) is a mode
//! transition, never an error.

use std::fmt;
use std::path::PathBuf;

/// Top-level error enum.
#[derive(Debug)]
pub enum Error {
    /// The settings file could not be read or written.
    SettingsIo {
        /// File that was being accessed.
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file exists but is not valid settings JSON.
    SettingsParse(serde_json::Error),

    /// An asset named in the manifest is not provided by the host.
    MissingAsset {
        /// Asset identifier, e.g. `"coin"` or `"explosion"`.
        id: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SettingsIo { path, source } => {
                write!(f, "settings file '{}': {}", path.display(), source)
            }
            Error::SettingsParse(e) => write!(f, "malformed settings: {}", e),
            Error::MissingAsset { id } => write!(f, "missing asset '{}'", id),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::SettingsIo { source, .. } => Some(source),
            Error::SettingsParse(e) => Some(e),
            Error::MissingAsset { .. } => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SettingsParse(e)
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
