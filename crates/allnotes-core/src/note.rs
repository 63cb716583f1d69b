//! Parsed note files.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::entry::Entry;
use crate::error::ParseWarning;

/// The parsed representation of one source file.
///
/// A note owns its entries. Each entry shares the note's path so it can
/// report where it came from after the notes themselves are gone.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    path: Arc<Path>,
    #[serde(skip)]
    text: String,
    entries: Vec<Entry>,
    warnings: Vec<ParseWarning>,
}

impl Note {
    /// Create a note with no entries yet.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path: PathBuf = path.into();
        Self {
            path: Arc::from(path),
            text: text.into(),
            entries: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Location of the note file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full contents of the file.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Diagnostics collected while splitting.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Check if there were any warnings while splitting.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Append an entry dated `timestamp` whose text is `body`.
    pub fn push_entry(&mut self, timestamp: DateTime<FixedOffset>, body: &str) {
        let entry = Entry::new(timestamp, body, Arc::clone(&self.path));
        self.entries.push(entry);
    }

    /// Append an entry whose text is `span` of the note's own contents.
    ///
    /// # Panics
    ///
    /// If `span` is out of bounds or not on a character boundary.
    pub fn push_span(&mut self, timestamp: DateTime<FixedOffset>, span: Range<usize>) {
        let entry = Entry::new(timestamp, &self.text[span], Arc::clone(&self.path));
        self.entries.push(entry);
    }

    /// Record a non-fatal diagnostic.
    pub fn push_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    /// Consume the note, keeping only its entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_push_entry_links_back_to_note() {
        let mut note = Note::new("/home/u/notes.txt", "ignored");
        let when = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2019, 5, 4, 10, 30, 0)
            .unwrap();

        note.push_entry(when, "  body  ");

        assert_eq!(note.entries().len(), 1);
        let entry = &note.entries()[0];
        assert_eq!(entry.body(), "body");
        assert_eq!(&**entry.source(), Path::new("/home/u/notes.txt"));
        assert!(!note.has_warnings());
    }

    #[test]
    fn test_push_span_slices_own_text() {
        let mut note = Note::new("/n.txt", "STAMP\n  first body \nSTAMP\nsecond");
        let when = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2019, 5, 4, 10, 30, 0)
            .unwrap();

        note.push_span(when, 5..20);
        note.push_span(when, 26..note.text().len());

        assert_eq!(note.entries()[0].body(), "first body");
        assert_eq!(note.entries()[1].body(), "second");
    }

    #[test]
    fn test_warnings_are_kept() {
        let mut note = Note::new("/n.txt", "");
        note.push_warning(ParseWarning::no_timestamps("/n.txt"));
        assert!(note.has_warnings());
        assert_eq!(note.warnings()[0].kind, crate::WarningKind::NoTimestamps);
    }
}
