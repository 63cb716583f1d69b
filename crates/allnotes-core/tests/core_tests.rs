use allnotes_core::{DiscoveryConfig, Entry, HomeDir, Note, ParseWarning, WarningKind};
use chrono::{FixedOffset, TimeZone};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[test]
fn test_note_entries_share_note_path() {
    let mut note = Note::new("/home/u/a/notes.txt", "Mon Jan  2 15:04:05 MST 2006\nhi\n");
    let offset = FixedOffset::west_opt(7 * 3600).unwrap();
    let when = offset.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();

    note.push_entry(when, "hi");
    note.push_entry(when, "again");

    let entries = note.clone().into_entries();
    assert_eq!(entries.len(), 2);
    assert!(Arc::ptr_eq(entries[0].source(), entries[1].source()));
    assert_eq!(note.path(), Path::new("/home/u/a/notes.txt"));
    assert!(note.text().starts_with("Mon Jan"));
}

#[test]
fn test_entry_serializes_paths_and_timestamp() {
    let offset = FixedOffset::east_opt(0).unwrap();
    let when = offset.with_ymd_and_hms(2021, 6, 1, 8, 0, 0).unwrap();
    let mut entry = Entry::new(when, "body", Arc::from(Path::new("/a/notes.txt")));
    entry.add_path(Arc::from(Path::new("/b/notes.txt")));

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["body"], "body");
    assert_eq!(json["source"], "/a/notes.txt");
    assert_eq!(json["additional_paths"][0], "/b/notes.txt");
    assert_eq!(json["timestamp"], "2021-06-01T08:00:00+00:00");
}

#[test]
fn test_warning_kinds_are_distinct() {
    let a = ParseWarning::no_timestamps("/n");
    let b = ParseWarning::leading_text("/n", 3);
    let c = ParseWarning::unknown_zone("/n", "QQQ");

    assert_eq!(a.kind, WarningKind::NoTimestamps);
    assert_eq!(b.kind, WarningKind::LeadingText);
    assert_eq!(c.kind, WarningKind::UnknownZone);
    assert_ne!(a, b);
}

#[test]
fn test_discovery_config_serde_defaults() {
    let config: DiscoveryConfig = serde_json::from_str(r#"{"home": "/home/u"}"#).unwrap();

    assert_eq!(config.home, PathBuf::from("/home/u"));
    assert_eq!(config.file_names, vec!["notes.txt", "log.txt"]);
    assert_eq!(config.exclude.len(), 2);
    assert!(config.roots.is_empty());
    assert!(config.index_file.is_none());
    assert_eq!(config.threads, 0);
}

#[test]
fn test_home_dir_from_config() {
    let config = DiscoveryConfig::new("/home/u");
    let home: HomeDir = config.home_dir();
    assert_eq!(home.path(), Path::new("/home/u"));
    assert_eq!(home.shorten(Path::new("/home/u/log.txt")), "~/log.txt");
    assert_eq!(home.join("x/notes.txt"), PathBuf::from("/home/u/x/notes.txt"));
}
