//! Layouts: templates that render and parse one timestamp style.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike};

use crate::error::LayoutError;
use crate::zone;

/// A whitespace-separated sequence of strftime fields, e.g.
/// `%a %b %e %H:%M:%S %Z %Y`.
///
/// Four fields get special treatment and must stand alone:
///
/// - `%a` (weekday) is rendered but not checked against the date on parse;
/// - `%p` is an AM/PM marker applied to a 24-hour `%H`, so both
///   `03:04:05 PM` and `15:04:05 PM` read as 15:04:05;
/// - `%Z` is a zone abbreviation resolved through [`zone::resolve`];
/// - `%z` is a numeric `+hhmm` offset.
///
/// Parsing splits on any run of whitespace, so space-padded days (`Jan  2`)
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    template: String,
}

/// A timestamp read through a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTimestamp {
    /// The absolute instant, in the offset written in the text.
    pub timestamp: DateTime<FixedOffset>,
    /// Zone abbreviation that was not in the table and was read as UTC.
    pub unknown_zone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field<'a> {
    Weekday,
    Meridiem,
    ZoneName,
    ZoneOffset,
    Chrono(&'a str),
}

impl<'a> Field<'a> {
    fn classify(token: &'a str) -> Self {
        match token {
            "%a" | "%A" => Field::Weekday,
            "%p" | "%P" => Field::Meridiem,
            "%Z" => Field::ZoneName,
            "%z" => Field::ZoneOffset,
            other => Field::Chrono(other),
        }
    }
}

const STANDALONE: [&str; 6] = ["%a", "%A", "%p", "%P", "%Z", "%z"];

impl Layout {
    /// Build a layout, rejecting templates chrono cannot render.
    pub fn new(template: impl Into<String>) -> Result<Self, String> {
        let template = template.into();
        if template.split_whitespace().next().is_none() {
            return Err("layout is empty".to_string());
        }
        for token in template.split_whitespace() {
            if StrftimeItems::new(token).any(|item| matches!(item, Item::Error)) {
                return Err(format!("unknown specifier in {token:?}"));
            }
            if let Field::Chrono(text) = Field::classify(token)
                && let Some(special) = STANDALONE.iter().find(|s| text.contains(*s))
            {
                return Err(format!("{special} must be a field of its own"));
            }
        }
        Ok(Self { template })
    }

    /// The template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    fn fields(&self) -> impl Iterator<Item = Field<'_>> {
        self.template.split_whitespace().map(Field::classify)
    }

    /// Render `at` through this layout, writing `zone_name` for `%Z`.
    pub fn render(&self, at: &DateTime<FixedOffset>, zone_name: &str) -> String {
        self.template
            .split_whitespace()
            .map(|token| match Field::classify(token) {
                Field::ZoneName => zone_name.to_string(),
                _ => at.format(token).to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse `text` into an absolute timestamp.
    ///
    /// Layouts without a zone field read the time as UTC.
    pub fn parse(&self, text: &str) -> Result<ParsedTimestamp, LayoutError> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let expected = self.fields().count();
        if words.len() != expected {
            return Err(LayoutError::FieldCount {
                expected,
                found: words.len(),
            });
        }

        let mut offset = None;
        let mut unknown_zone = None;
        let mut meridiem = None;
        let mut format = Vec::with_capacity(expected);
        let mut input = Vec::with_capacity(expected);

        for (field, word) in self.fields().zip(words) {
            match field {
                // Weekday names are decoration; notes with a wrong weekday
                // still carry a valid date.
                Field::Weekday => {}
                Field::Meridiem => meridiem = Some(parse_meridiem(word)?),
                Field::ZoneName => match zone::resolve(word) {
                    Some(resolved) => offset = Some(resolved),
                    None => {
                        offset = Some(zone::utc());
                        unknown_zone = Some(word.to_string());
                    }
                },
                Field::ZoneOffset => {
                    let parsed = zone::parse_numeric(word).ok_or_else(|| LayoutError::Offset {
                        text: word.to_string(),
                    })?;
                    offset = Some(parsed);
                }
                Field::Chrono(token) => {
                    format.push(token);
                    input.push(word);
                }
            }
        }

        let mut naive = NaiveDateTime::parse_from_str(&input.join(" "), &format.join(" "))?;
        if let Some(pm) = meridiem {
            naive = apply_meridiem(naive, pm).ok_or_else(|| LayoutError::Hour {
                text: text.to_string(),
            })?;
        }

        let offset = offset.unwrap_or_else(zone::utc);
        let timestamp = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| LayoutError::Hour {
                text: text.to_string(),
            })?;

        Ok(ParsedTimestamp {
            timestamp,
            unknown_zone,
        })
    }
}

/// `true` for PM.
fn parse_meridiem(word: &str) -> Result<bool, LayoutError> {
    if word.eq_ignore_ascii_case("am") {
        Ok(false)
    } else if word.eq_ignore_ascii_case("pm") {
        Ok(true)
    } else {
        Err(LayoutError::Meridiem {
            text: word.to_string(),
        })
    }
}

fn apply_meridiem(naive: NaiveDateTime, pm: bool) -> Option<NaiveDateTime> {
    let hour = naive.hour();
    let adjusted = match (pm, hour) {
        (true, h) if h < 12 => h + 12,
        (false, 12) => 0,
        (_, h) => h,
    };
    naive.with_hour(adjusted)
}
