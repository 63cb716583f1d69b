//! Dated journal entries.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One timestamped block of text extracted from a note.
///
/// The body is trimmed on construction and never changes afterwards. The
/// only mutable part of an entry is its list of additional paths, which the
/// merge pass appends to when it collapses identical entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    timestamp: DateTime<FixedOffset>,
    body: String,
    source: Arc<Path>,
    additional_paths: Vec<Arc<Path>>,
}

impl Entry {
    /// Create an entry owned by the note at `source`.
    pub fn new(timestamp: DateTime<FixedOffset>, body: &str, source: Arc<Path>) -> Self {
        Self {
            timestamp,
            body: body.trim().to_string(),
            source,
            additional_paths: Vec::new(),
        }
    }

    /// When the entry was written, in the offset recorded in the note.
    pub fn timestamp(&self) -> &DateTime<FixedOffset> {
        &self.timestamp
    }

    /// The trimmed entry text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Path of the note this entry was read from.
    pub fn source(&self) -> &Arc<Path> {
        &self.source
    }

    /// Other notes in which an identical entry was found.
    pub fn additional_paths(&self) -> &[Arc<Path>] {
        &self.additional_paths
    }

    /// The source path followed by every additional path.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(&*self.source).chain(self.additional_paths.iter().map(|p| &**p))
    }

    /// Same instant and byte-for-byte identical body.
    pub fn same_content(&self, other: &Entry) -> bool {
        self.timestamp == other.timestamp && self.body == other.body
    }

    /// Record another location of this entry.
    pub fn add_path(&mut self, path: Arc<Path>) {
        self.additional_paths.push(path);
    }

    /// Check if identical copies were merged into this entry.
    pub fn is_merged(&self) -> bool {
        !self.additional_paths.is_empty()
    }
}
