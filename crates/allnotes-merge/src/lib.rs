//! Chronological merge of note entries.
//!
//! Notes are parsed one file at a time; this crate turns the per-file entry
//! lists into one feed:
//!
//! 1. Flatten the entries of every note
//! 2. Stable sort by timestamp
//! 3. Collapse adjacent entries with the same instant and identical body,
//!    recording each extra source path on the surviving entry
//!
//! Only entries that end up next to each other after sorting are merged. A
//! duplicate separated from its twin by a different entry at the same
//! instant stays a separate entry.
//!
//! ```rust,ignore
//! use allnotes_merge::EntryAggregator;
//! use allnotes_parse::NoteParser;
//!
//! let parser = NoteParser::standard()?;
//! let notes = vec![
//!     parser.parse("/home/me/notes.txt", home_text)?,
//!     parser.parse("/backup/me/notes.txt", backup_text)?,
//! ];
//!
//! for entry in EntryAggregator::new().aggregate(notes) {
//!     println!("{} {}", entry.timestamp(), entry.body());
//! }
//! ```

mod aggregate;

pub use aggregate::{EntryAggregator, MergeReport, merge_adjacent};

// Re-export core types
pub use allnotes_core::{Entry, Note};
