//! Time zone abbreviations and numeric offsets.
//!
//! Zone names such as `EST` are not unique worldwide, so this is a fixed
//! table of the abbreviations `date(1)` commonly prints. Anything else is
//! read as UTC by the caller and reported as a warning.

use chrono::{FixedOffset, Offset, Utc};

/// The zero offset.
pub fn utc() -> FixedOffset {
    Utc.fix()
}

/// Resolve a zone abbreviation to its offset from UTC.
pub fn resolve(abbreviation: &str) -> Option<FixedOffset> {
    let minutes: i32 = match abbreviation {
        "UTC" | "UT" | "GMT" | "Z" | "WET" => 0,
        "BST" | "CET" | "WEST" => 60,
        "CEST" | "EET" | "SAST" => 2 * 60,
        "EEST" | "MSK" => 3 * 60,
        "GST" => 4 * 60,
        "PKT" => 5 * 60,
        "IST" => 5 * 60 + 30,
        "ICT" | "WIB" => 7 * 60,
        "HKT" | "SGT" | "AWST" => 8 * 60,
        "JST" | "KST" => 9 * 60,
        "ACST" => 9 * 60 + 30,
        "AEST" => 10 * 60,
        "ACDT" => 10 * 60 + 30,
        "AEDT" => 11 * 60,
        "NZST" => 12 * 60,
        "NZDT" => 13 * 60,
        "NDT" => -(2 * 60 + 30),
        "ADT" => -3 * 60,
        "NST" => -(3 * 60 + 30),
        "AST" | "EDT" => -4 * 60,
        "EST" | "CDT" => -5 * 60,
        "CST" | "MDT" => -6 * 60,
        "MST" | "PDT" => -7 * 60,
        "PST" | "AKDT" => -8 * 60,
        "AKST" => -9 * 60,
        "HST" => -10 * 60,
        _ => return None,
    };
    FixedOffset::east_opt(minutes * 60)
}

/// Parse a numeric offset in `+hhmm` / `-hhmm` form.
pub fn parse_numeric(text: &str) -> Option<FixedOffset> {
    let (sign, digits) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_zones() {
        assert_eq!(resolve("MST"), FixedOffset::west_opt(7 * 3600));
        assert_eq!(resolve("EDT"), FixedOffset::west_opt(4 * 3600));
        assert_eq!(resolve("UTC"), Some(utc()));
        assert_eq!(resolve("CEST"), FixedOffset::east_opt(2 * 3600));
        assert_eq!(resolve("NST"), FixedOffset::west_opt(3 * 3600 + 1800));
    }

    #[test]
    fn test_resolve_unknown_zone() {
        assert_eq!(resolve("XYZ"), None);
        assert_eq!(resolve("est"), None);
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("-0700"), FixedOffset::west_opt(7 * 3600));
        assert_eq!(parse_numeric("+0530"), FixedOffset::east_opt(5 * 3600 + 1800));
        assert_eq!(parse_numeric("+0000"), Some(utc()));
        assert_eq!(parse_numeric("0700"), None);
        assert_eq!(parse_numeric("+07:00"), None);
        assert_eq!(parse_numeric("+0760"), None);
        assert_eq!(parse_numeric("+9900"), None);
        assert_eq!(parse_numeric(""), None);
    }
}
