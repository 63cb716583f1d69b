//! Error and warning types shared across the workspace.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while locating note files.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An exclusion pattern could not be compiled.
    #[error("Invalid exclude pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl DiscoveryError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of parse warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// The file contains no recognizable timestamp at all.
    NoTimestamps,
    /// Text before the first timestamp was discarded.
    LeadingText,
    /// A zone abbreviation was not in the table and was read as UTC.
    UnknownZone,
    /// The file was not valid UTF-8; invalid bytes were replaced.
    InvalidUtf8,
}

/// Non-fatal diagnostic produced while splitting a note into entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// Note the warning belongs to.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ParseWarning {
    /// The note has no dated entries.
    pub fn no_timestamps(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("{} does not have any dates", path.display()),
            path,
            kind: WarningKind::NoTimestamps,
        }
    }

    /// The note does not start with a timestamp; `discarded` bytes were dropped.
    pub fn leading_text(path: impl Into<PathBuf>, discarded: usize) -> Self {
        let path = path.into();
        Self {
            message: format!(
                "{} does not start with a date ({discarded} leading bytes ignored)",
                path.display()
            ),
            path,
            kind: WarningKind::LeadingText,
        }
    }

    /// The file had invalid UTF-8 sequences.
    pub fn invalid_utf8(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!(
                "{} is not valid UTF-8, invalid bytes replaced",
                path.display()
            ),
            path,
            kind: WarningKind::InvalidUtf8,
        }
    }

    /// A zone abbreviation could not be resolved.
    pub fn unknown_zone(path: impl Into<PathBuf>, abbreviation: &str) -> Self {
        let path = path.into();
        Self {
            message: format!(
                "{}: unknown time zone {abbreviation:?}, assuming UTC",
                path.display()
            ),
            path,
            kind: WarningKind::UnknownZone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_error_io() {
        let err = DiscoveryError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, DiscoveryError::PermissionDenied { .. }));

        let err = DiscoveryError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::InvalidData, "bad"),
        );
        assert!(matches!(err, DiscoveryError::Io { .. }));
    }

    #[test]
    fn test_parse_warning_creation() {
        let warning = ParseWarning::leading_text("/home/u/notes.txt", 12);
        assert_eq!(warning.kind, WarningKind::LeadingText);
        assert!(warning.message.contains("does not start with a date"));
        assert!(warning.message.contains("12 leading bytes"));

        let warning = ParseWarning::unknown_zone("/n.txt", "XYZ");
        assert_eq!(warning.kind, WarningKind::UnknownZone);
        assert!(warning.message.contains("\"XYZ\""));
    }
}
