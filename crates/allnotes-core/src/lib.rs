//! Core types for allnotes.
//!
//! This crate provides the data model shared by the rest of the workspace:
//! parsed notes and their dated entries, non-fatal parse warnings, and the
//! discovery configuration including the explicit home directory.

mod config;
mod entry;
mod error;
mod note;

pub use config::{DiscoveryConfig, DiscoveryConfigBuilder, HomeDir};
pub use entry::Entry;
pub use error::{DiscoveryError, ParseWarning, WarningKind};
pub use note::Note;
