//! Error types for format registration and note parsing.

use std::path::PathBuf;

use thiserror::Error;

/// The format registry is internally inconsistent.
///
/// These are programming errors in the format table, detected once at
/// construction time before any note is parsed.
#[derive(Debug, Error)]
pub enum FormatError {
    /// No formats were registered.
    #[error("No timestamp formats registered")]
    Empty,

    /// A layout contains an unknown or misplaced specifier.
    #[error("Format {name}: invalid layout {layout:?}: {message}")]
    InvalidLayout {
        name: String,
        layout: String,
        message: String,
    },

    /// A recognizer is not a valid regular expression.
    #[error("Format {name}: invalid recognizer: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// A recognizer declares its own capture groups, which would break
    /// group-to-format indexing in the combined pattern.
    #[error("Format {name}: recognizer must not contain capture groups")]
    CaptureGroups { name: String },

    /// The canonical example does not match the recognizer.
    #[error("Format {name}: example {example:?} does not match {pattern:?}")]
    ExampleMismatch {
        name: String,
        example: String,
        pattern: String,
    },

    /// The layout cannot read back its own example.
    #[error("Format {name}: example {example:?} does not parse: {source}")]
    RoundTrip {
        name: String,
        example: String,
        #[source]
        source: LayoutError,
    },

    /// The layout reads its example back as a different timestamp.
    #[error("Format {name}: example {example:?} renders back as {parsed:?}")]
    RoundTripMismatch {
        name: String,
        example: String,
        parsed: String,
    },

    /// Two recognizers claim the same text.
    #[error("Format {name} overlaps with {other}: an explicit disambiguation rule is required")]
    Overlap { name: String, other: String },

    /// The reference instant could not be constructed.
    #[error("Invalid reference time: {0}")]
    Reference(#[from] chrono::ParseError),
}

/// Matched text could not be converted by a layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Text and layout have a different number of fields.
    #[error("Expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A numeric offset such as `-0700` is malformed.
    #[error("Invalid UTC offset {text:?}")]
    Offset { text: String },

    /// An AM/PM marker is malformed.
    #[error("Invalid AM/PM marker {text:?}")]
    Meridiem { text: String },

    /// The hour cannot be combined with the AM/PM marker.
    #[error("Hour out of range for {text:?}")]
    Hour { text: String },

    /// The remaining fields were rejected by chrono.
    #[error(transparent)]
    Chrono(#[from] chrono::ParseError),
}

/// Fatal errors while splitting a note.
///
/// Malformed note content never produces these; they indicate that the
/// combined pattern and the layouts have fallen out of sync.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A match was found but no format group was populated.
    #[error("{path}: no timestamp format claims {text:?}")]
    NoLayout { path: PathBuf, text: String },

    /// A match populated more than one format group.
    #[error("{path}: {text:?} is claimed by several formats ({formats})")]
    AmbiguousLayout {
        path: PathBuf,
        text: String,
        formats: String,
    },

    /// The recognizer accepted text the layout rejects.
    #[error("{path}: failed to parse {text:?} as {format}: {source}")]
    Timestamp {
        path: PathBuf,
        text: String,
        format: String,
        #[source]
        source: LayoutError,
    },
}
