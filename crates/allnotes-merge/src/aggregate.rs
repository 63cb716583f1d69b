//! Flatten, sort and merge entries from many notes.

use std::sync::Arc;

use itertools::Itertools;
use serde::Serialize;

use allnotes_core::{Entry, Note};

/// Results of a merge, with counts for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Merged entries in ascending timestamp order.
    pub entries: Vec<Entry>,

    /// Number of notes that were merged.
    pub notes: usize,

    /// Number of entries before merging.
    pub entries_seen: usize,

    /// Number of entries folded into an identical neighbour.
    pub duplicates_merged: usize,
}

impl MergeReport {
    /// Check if any duplicates were collapsed.
    pub fn has_duplicates(&self) -> bool {
        self.duplicates_merged > 0
    }
}

/// Builds the chronological feed from parsed notes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryAggregator;

impl EntryAggregator {
    /// Create a new aggregator.
    pub fn new() -> Self {
        Self
    }

    /// Flatten, sort and merge the entries of `notes`.
    ///
    /// Returns an empty feed for empty input.
    pub fn aggregate(&self, notes: impl IntoIterator<Item = Note>) -> Vec<Entry> {
        self.report(notes).entries
    }

    /// Like [`Self::aggregate`], also returning counts.
    pub fn report(&self, notes: impl IntoIterator<Item = Note>) -> MergeReport {
        let mut note_count = 0;
        let mut entries: Vec<Entry> = notes
            .into_iter()
            .inspect(|_| note_count += 1)
            .flat_map(Note::into_entries)
            .collect();
        let entries_seen = entries.len();

        // Stable: entries at the same instant keep their flattened order.
        entries.sort_by_key(|e| *e.timestamp());

        let entries = merge_adjacent(entries);
        let duplicates_merged = entries_seen - entries.len();

        tracing::debug!(
            notes = note_count,
            entries_seen,
            duplicates_merged,
            "merged note entries"
        );

        MergeReport {
            entries,
            notes: note_count,
            entries_seen,
            duplicates_merged,
        }
    }
}

/// Collapse runs of identical entries in already sorted input.
///
/// Each entry that has the same instant and body as the entry before it is
/// dropped, and its source path is appended to the surviving entry.
pub fn merge_adjacent(entries: Vec<Entry>) -> Vec<Entry> {
    entries
        .into_iter()
        .coalesce(|mut current, next| {
            if current.same_content(&next) {
                current.add_path(Arc::clone(next.source()));
                Ok(current)
            } else {
                Err((current, next))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone};
    use std::path::Path;

    fn at(minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2022, 2, 2, 12, minute, 0)
            .unwrap()
    }

    fn entry(minute: u32, body: &str, path: &str) -> Entry {
        Entry::new(at(minute), body, Arc::from(Path::new(path)))
    }

    #[test]
    fn test_merge_adjacent_collapses_runs() {
        let merged = merge_adjacent(vec![
            entry(1, "a", "/x"),
            entry(1, "a", "/y"),
            entry(1, "a", "/z"),
            entry(2, "b", "/x"),
        ]);

        assert_eq!(merged.len(), 2);
        let paths: Vec<&Path> = merged[0].paths().collect();
        assert_eq!(paths, vec![Path::new("/x"), Path::new("/y"), Path::new("/z")]);
        assert!(!merged[1].is_merged());
    }

    #[test]
    fn test_merge_adjacent_only_merges_neighbours() {
        let merged = merge_adjacent(vec![
            entry(1, "a", "/x"),
            entry(1, "b", "/x"),
            entry(1, "a", "/y"),
        ]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_adjacent_empty() {
        assert!(merge_adjacent(Vec::new()).is_empty());
    }

    #[test]
    fn test_report_counts() {
        let mut a = Note::new("/a", "");
        a.push_entry(at(5), "same");
        a.push_entry(at(9), "only a");
        let mut b = Note::new("/b", "");
        b.push_entry(at(5), "same");

        let report = EntryAggregator::new().report(vec![a, b]);

        assert_eq!(report.notes, 2);
        assert_eq!(report.entries_seen, 3);
        assert_eq!(report.duplicates_merged, 1);
        assert!(report.has_duplicates());
        assert_eq!(report.entries.len(), 2);
        assert_eq!(&*report.entries[0].additional_paths()[0], Path::new("/b"));
    }
}
