//! Timestamp recognition and note splitting for allnotes.
//!
//! Notes are append-only text files in which every entry starts with a
//! timestamp line. Over the years several timestamp styles have been used,
//! so splitting a note is a two-stage process:
//!
//! 1. A [`DateFormatRegistry`] holds the known [`TimestampFormat`]s and one
//!    combined pattern that finds every timestamp at the start of a line.
//! 2. For each match, the registry reports which format claimed it and that
//!    format's [`Layout`] turns the text into an absolute time.
//!
//! ```rust
//! use allnotes_parse::NoteParser;
//!
//! let parser = NoteParser::standard().unwrap();
//! let note = parser
//!     .parse(
//!         "/home/me/notes.txt",
//!         "Mon Jan  2 15:04:05 MST 2006\nFirst entry\n\n\
//!          Tue Jan  3 09:00:00 MST 2006\nSecond entry\n",
//!     )
//!     .unwrap();
//!
//! assert_eq!(note.entries().len(), 2);
//! assert_eq!(note.entries()[1].body(), "Second entry");
//! ```

mod error;
mod formats;
mod layout;
mod parser;
pub mod zone;

pub use error::{FormatError, LayoutError, ParseError};
pub use formats::{DateFormatRegistry, FormatMatch, REFERENCE_TIME, REFERENCE_ZONE, TimestampFormat};
pub use layout::{Layout, ParsedTimestamp};
pub use parser::NoteParser;

// Re-export core types
pub use allnotes_core::{Entry, Note, ParseWarning, WarningKind};
