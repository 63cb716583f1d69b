//! The registry of known timestamp formats.

use chrono::DateTime;
use regex::{Captures, Regex};

use crate::error::FormatError;
use crate::layout::Layout;

/// Instant every format renders as its canonical example.
pub const REFERENCE_TIME: &str = "2006-01-02T15:04:05-07:00";

/// Zone abbreviation written for `%Z` in canonical examples.
pub const REFERENCE_ZONE: &str = "MST";

/// Body text appended to examples when checking recognizers for overlap.
const PROBE_BODY: &str = "\nSome entry text. AM PM 2006\n";

const HHMMSS: &str = "[0-9]{2}:[0-9]{2}:[0-9]{2}";

/// One timestamp style: a layout paired with a recognizer that finds text
/// produced by that layout inside a larger file.
#[derive(Debug, Clone)]
pub struct TimestampFormat {
    name: String,
    layout: Layout,
    recognizer: String,
}

impl TimestampFormat {
    /// Create a format. The recognizer must not contain capture groups.
    pub fn new(
        name: impl Into<String>,
        layout: &str,
        recognizer: impl Into<String>,
    ) -> Result<Self, FormatError> {
        let name = name.into();
        let layout = Layout::new(layout).map_err(|message| FormatError::InvalidLayout {
            name: name.clone(),
            layout: layout.to_string(),
            message,
        })?;
        Ok(Self {
            name,
            layout,
            recognizer: recognizer.into(),
        })
    }

    /// Short identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template used to parse matched text.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Regular expression that finds this format in running text.
    pub fn recognizer(&self) -> &str {
        &self.recognizer
    }

    fn compile(&self, anchors: (&str, &str)) -> Result<Regex, FormatError> {
        Regex::new(&format!("{}(?:{}){}", anchors.0, self.recognizer, anchors.1)).map_err(
            |source| FormatError::InvalidPattern {
                name: self.name.clone(),
                source: Box::new(source),
            },
        )
    }
}

/// Which format claimed a match of the combined pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatMatch {
    /// Exactly one format group was populated.
    Unique(usize),
    /// No format group was populated.
    Missing,
    /// Several format groups were populated.
    Ambiguous(Vec<usize>),
}

/// Ordered set of timestamp formats plus the combined pattern that locates
/// entry boundaries.
///
/// The combined pattern is `(?m)(^r1)|(^r2)|...`: capture group `i + 1`
/// belongs to format `i`. Recognizers are required to be disjoint over
/// running text, so alternative order never decides which format wins.
#[derive(Debug, Clone)]
pub struct DateFormatRegistry {
    formats: Vec<TimestampFormat>,
    examples: Vec<String>,
    pattern: Regex,
}

impl DateFormatRegistry {
    /// Validate `formats` and build the combined pattern.
    ///
    /// For every format:
    /// - the recognizer compiles and declares no capture groups;
    /// - the reference instant rendered through the layout matches the
    ///   recognizer exactly, parses, and renders back to the same text;
    /// - the example (followed by body text) is matched by no other
    ///   recognizer, and the combined pattern finds it exactly once under
    ///   its own group.
    pub fn new(formats: Vec<TimestampFormat>) -> Result<Self, FormatError> {
        if formats.is_empty() {
            return Err(FormatError::Empty);
        }

        let reference = DateTime::parse_from_rfc3339(REFERENCE_TIME)?;
        let mut examples = Vec::with_capacity(formats.len());
        let mut prefixes = Vec::with_capacity(formats.len());

        for format in &formats {
            let exact = format.compile(("^", "$"))?;
            if exact.captures_len() != 1 {
                return Err(FormatError::CaptureGroups {
                    name: format.name.clone(),
                });
            }

            let example = format.layout.render(&reference, REFERENCE_ZONE);
            if !exact.is_match(&example) {
                return Err(FormatError::ExampleMismatch {
                    name: format.name.clone(),
                    example,
                    pattern: format.recognizer.clone(),
                });
            }
            check_round_trip(format, &example)?;

            prefixes.push(format.compile(("^", ""))?);
            examples.push(example);
        }

        for (i, example) in examples.iter().enumerate() {
            let probe = format!("{example}{PROBE_BODY}");
            for (j, prefix) in prefixes.iter().enumerate() {
                if i != j && prefix.is_match(&probe) {
                    return Err(FormatError::Overlap {
                        name: formats[i].name.clone(),
                        other: formats[j].name.clone(),
                    });
                }
            }
        }

        let pattern = combined_pattern(&formats)?;
        let registry = Self {
            formats,
            examples,
            pattern,
        };
        registry.check_combined()?;
        Ok(registry)
    }

    /// The built-in formats, oldest style first.
    pub fn standard() -> Result<Self, FormatError> {
        Self::new(standard_formats()?)
    }

    /// Registered formats in group order.
    pub fn formats(&self) -> &[TimestampFormat] {
        &self.formats
    }

    /// Format at `index`.
    pub fn get(&self, index: usize) -> Option<&TimestampFormat> {
        self.formats.get(index)
    }

    /// Canonical example of the format at `index`.
    pub fn example(&self, index: usize) -> Option<&str> {
        self.examples.get(index).map(String::as_str)
    }

    /// Number of registered formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Always false for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// The combined, multi-line pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Determine which format produced a match of [`Self::pattern`].
    pub fn which_format(&self, captures: &Captures<'_>) -> FormatMatch {
        let populated: Vec<usize> = (0..self.formats.len())
            .filter(|i| captures.get(i + 1).is_some())
            .collect();
        match populated.as_slice() {
            [] => FormatMatch::Missing,
            [index] => FormatMatch::Unique(*index),
            _ => FormatMatch::Ambiguous(populated),
        }
    }

    /// Every example must be found once, at offset 0, under its own group.
    fn check_combined(&self) -> Result<(), FormatError> {
        for (i, example) in self.examples.iter().enumerate() {
            let found: Vec<Captures<'_>> = self.pattern.captures_iter(example).collect();
            let claimed = match found.as_slice() {
                [only] => {
                    only.get(0).is_some_and(|m| m.start() == 0 && m.end() == example.len())
                        && self.which_format(only) == FormatMatch::Unique(i)
                }
                _ => false,
            };
            if !claimed {
                return Err(FormatError::ExampleMismatch {
                    name: self.formats[i].name.clone(),
                    example: example.clone(),
                    pattern: self.pattern.as_str().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Only the fields a layout encodes are compared, so layouts without a zone
/// or without seconds still qualify.
fn check_round_trip(format: &TimestampFormat, example: &str) -> Result<(), FormatError> {
    let parsed = format
        .layout
        .parse(example)
        .map_err(|source| FormatError::RoundTrip {
            name: format.name.clone(),
            example: example.to_string(),
            source,
        })?;
    let rendered = format.layout.render(&parsed.timestamp, REFERENCE_ZONE);
    if rendered != example || parsed.unknown_zone.is_some() {
        return Err(FormatError::RoundTripMismatch {
            name: format.name.clone(),
            example: example.to_string(),
            parsed: rendered,
        });
    }
    Ok(())
}

fn combined_pattern(formats: &[TimestampFormat]) -> Result<Regex, FormatError> {
    let alternatives: Vec<String> = formats
        .iter()
        .map(|f| format!("(^(?:{}))", f.recognizer))
        .collect();
    Regex::new(&format!("(?m){}", alternatives.join("|"))).map_err(|source| {
        FormatError::InvalidPattern {
            name: "combined".to_string(),
            source: Box::new(source),
        }
    })
}

fn standard_formats() -> Result<Vec<TimestampFormat>, FormatError> {
    let day_first = "[A-Z][a-z]{2} [0-9 ][0-9] [A-Z][a-z]{2} [0-9]{4}";
    let month_first = "[A-Z][a-z]{2} [A-Z][a-z]{2} [0-9 ][0-9]";

    Ok(vec![
        // Mon  2 Jan 2006 03:04:05 PM MST
        TimestampFormat::new(
            "day-first-12h",
            "%a %e %b %Y %H:%M:%S %p %Z",
            format!("{day_first} {HHMMSS} [AP]M [A-Z]+"),
        )?,
        // Mon  2 Jan 2006 15:04:05 MST
        // Zone names need three letters so this cannot claim the AM/PM of
        // the 12-hour style. A day-first 24-hour line with a shorter zone
        // (`UT`, `Z`) is therefore not a boundary and stays in the body.
        TimestampFormat::new(
            "day-first-24h",
            "%a %e %b %Y %H:%M:%S %Z",
            format!("{day_first} {HHMMSS} [A-Z]{{3,}}"),
        )?,
        // Mon Jan  2 15:04:05 MST 2006
        TimestampFormat::new(
            "date",
            "%a %b %e %H:%M:%S %Z %Y",
            format!("{month_first} {HHMMSS} [A-Z]+ [0-9]{{4}}"),
        )?,
        // Mon Jan  2 15:04:05 -0700 2006
        TimestampFormat::new(
            "date-numeric-offset",
            "%a %b %e %H:%M:%S %z %Y",
            format!("{month_first} {HHMMSS} [+-][0-9]{{4}} [0-9]{{4}}"),
        )?,
    ])
}
