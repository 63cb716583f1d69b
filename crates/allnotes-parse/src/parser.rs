//! Splitting note text into dated entries.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use allnotes_core::{Note, ParseWarning};

use crate::error::{FormatError, ParseError};
use crate::formats::{DateFormatRegistry, FormatMatch};

/// Turns raw note text into a [`Note`] with one entry per timestamp.
///
/// The parser holds no mutable state, so a single instance can be shared
/// across threads to parse different files concurrently.
#[derive(Debug, Clone)]
pub struct NoteParser {
    registry: DateFormatRegistry,
}

/// One timestamp located in a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimestampMatch {
    start: usize,
    end: usize,
    format: usize,
}

impl NoteParser {
    /// Create a parser over a validated registry.
    pub fn new(registry: DateFormatRegistry) -> Self {
        Self { registry }
    }

    /// Create a parser using the built-in formats.
    pub fn standard() -> Result<Self, FormatError> {
        Ok(Self::new(DateFormatRegistry::standard()?))
    }

    /// The format registry in use.
    pub fn registry(&self) -> &DateFormatRegistry {
        &self.registry
    }

    /// Split `text`, read from `path`, into dated entries.
    ///
    /// Content problems are not errors: a file without timestamps yields a
    /// note with no entries, and text before the first timestamp is dropped.
    /// Both cases are logged and recorded as warnings on the note.
    pub fn parse(
        &self,
        path: impl Into<PathBuf>,
        text: impl Into<String>,
    ) -> Result<Note, ParseError> {
        let mut note = Note::new(path, text);
        let matches = self.locate(note.path(), note.text())?;

        let Some(first) = matches.first() else {
            let warning = ParseWarning::no_timestamps(note.path());
            tracing::warn!("{}", warning.message);
            note.push_warning(warning);
            return Ok(note);
        };

        if first.start != 0 {
            let warning = ParseWarning::leading_text(note.path(), first.start);
            tracing::warn!("{}", warning.message);
            note.push_warning(warning);
        }

        let mut unknown_zones = BTreeSet::new();
        let mut dated = Vec::with_capacity(matches.len());

        for (i, m) in matches.iter().enumerate() {
            let stamp = &note.text()[m.start..m.end];
            let format = &self.registry.formats()[m.format];
            let parsed = format
                .layout()
                .parse(stamp)
                .map_err(|source| ParseError::Timestamp {
                    path: note.path().to_path_buf(),
                    text: stamp.to_string(),
                    format: format.name().to_string(),
                    source,
                })?;

            if let Some(zone) = parsed.unknown_zone {
                unknown_zones.insert(zone);
            }

            let body_end = matches.get(i + 1).map_or(note.text().len(), |next| next.start);
            dated.push((parsed.timestamp, m.end..body_end));
        }

        for (timestamp, body) in dated {
            note.push_span(timestamp, body);
        }

        for zone in unknown_zones {
            let warning = ParseWarning::unknown_zone(note.path(), &zone);
            tracing::warn!("{}", warning.message);
            note.push_warning(warning);
        }

        tracing::debug!(
            path = %note.path().display(),
            entries = note.entries().len(),
            "split note"
        );

        Ok(note)
    }

    /// Find every timestamp and decide which format produced it.
    fn locate(&self, path: &Path, text: &str) -> Result<Vec<TimestampMatch>, ParseError> {
        let mut matches = Vec::new();

        for captures in self.registry.pattern().captures_iter(text) {
            let Some(whole) = captures.get(0) else {
                continue;
            };

            match self.registry.which_format(&captures) {
                FormatMatch::Unique(format) => matches.push(TimestampMatch {
                    start: whole.start(),
                    end: whole.end(),
                    format,
                }),
                FormatMatch::Missing => {
                    return Err(ParseError::NoLayout {
                        path: path.to_path_buf(),
                        text: whole.as_str().to_string(),
                    });
                }
                FormatMatch::Ambiguous(indices) => {
                    let formats = indices
                        .iter()
                        .filter_map(|i| self.registry.get(*i))
                        .map(|f| f.name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(ParseError::AmbiguousLayout {
                        path: path.to_path_buf(),
                        text: whole.as_str().to_string(),
                        formats,
                    });
                }
            }
        }

        Ok(matches)
    }
}
