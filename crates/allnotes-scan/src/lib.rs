//! Note discovery and loading for allnotes.
//!
//! # Overview
//!
//! `allnotes-scan` supplies the parsed notes the merge works on:
//!
//! - **Discovery** walks the configured roots in parallel via jwalk, adds
//!   paths listed in the fallback index file, then filters candidates by
//!   name, home directory and exclusion globs
//! - **Loading** reads each file and splits it with a [`NoteParser`],
//!   optionally on the rayon pool; any unreadable file aborts the load
//!
//! # Example
//!
//! ```rust,no_run
//! use allnotes_scan::{DiscoveryConfig, NoteFinder, NoteLoader, NoteParser};
//!
//! let config = DiscoveryConfig::new("/home/me");
//! let paths = NoteFinder::new().find(&config).unwrap();
//!
//! let loader = NoteLoader::new(NoteParser::standard().unwrap()).parallel(true);
//! let notes = loader.load_all(&paths).unwrap();
//!
//! println!("Loaded {} notes", notes.len());
//! ```

mod finder;
mod loader;

pub use finder::NoteFinder;
pub use loader::{LoadError, NoteLoader};

// Re-export types needed to drive discovery and loading
pub use allnotes_core::{DiscoveryConfig, DiscoveryError, HomeDir, Note};
pub use allnotes_parse::NoteParser;
