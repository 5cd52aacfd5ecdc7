//! Fixed-layout date detection.
//!
//! An ordered table of recognition rules, each a regular expression naming
//! the calendar fields it captures. Rules are tried in priority order and
//! the first structural match wins, even when a later rule would also match.

use crate::CivilDateTime;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::str::FromStr;

/// ISO 8601: `yyyy-MM-dd`, optional `Thh:mm:ss`, optional fractional
/// seconds (1-3 digits), optional `Z` or `±hh:mm` offset.
const ISO_8601: &str =
    r"^\d{4}-\d{2}-\d{2}(?P<time>T\d{2}:\d{2}:\d{2}(\.\d{1,3})?(?P<offset>Z|[+-]\d{2}:\d{2})?)?$";

/// RFC 2822: three-letter weekday, two-digit day, three-letter month name,
/// four-digit year, time, four-digit numeric offset.
const RFC_2822: &str = r"^\w{3},\s\d{2}\s\w{3}\s\d{4}\s\d{2}:\d{2}:\d{2}\s[+-]\d{4}$";

/// Delimiter-based numeric layouts, tried in order after the ISO and RFC
/// rules. Capture names bind each group to a calendar field: `y`, `m`, `d`
/// always, `H`, `M`, `S` when the layout carries a time.
const NUMERIC_LAYOUTS: [&str; 12] = [
    // dd/MM/yyyy
    r"^(?P<d>\d{2})/(?P<m>\d{2})/(?P<y>\d{4})$",
    // dd-MM-yyyy
    r"^(?P<d>\d{2})-(?P<m>\d{2})-(?P<y>\d{4})$",
    // yyyy/MM/dd
    r"^(?P<y>\d{4})/(?P<m>\d{2})/(?P<d>\d{2})$",
    // yyyy-MM-dd (the ISO 8601 rule claims these strings first)
    r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})$",
    // dd/MM/yyyy hh:mm:ss
    r"^(?P<d>\d{2})/(?P<m>\d{2})/(?P<y>\d{4})\s(?P<H>\d{2}):(?P<M>\d{2}):(?P<S>\d{2})$",
    // dd-MM-yyyy hh:mm:ss
    r"^(?P<d>\d{2})-(?P<m>\d{2})-(?P<y>\d{4})\s(?P<H>\d{2}):(?P<M>\d{2}):(?P<S>\d{2})$",
    // yyyy/MM/dd hh:mm:ss
    r"^(?P<y>\d{4})/(?P<m>\d{2})/(?P<d>\d{2})\s(?P<H>\d{2}):(?P<M>\d{2}):(?P<S>\d{2})$",
    // yyyy-MM-dd hh:mm:ss
    r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})\s(?P<H>\d{2}):(?P<M>\d{2}):(?P<S>\d{2})$",
    // dd/MM/yyyy/hh/mm/ss
    r"^(?P<d>\d{2})/(?P<m>\d{2})/(?P<y>\d{4})/(?P<H>\d{2})/(?P<M>\d{2})/(?P<S>\d{2})$",
    // yyyy/MM/dd/hh/mm/ss
    r"^(?P<y>\d{4})/(?P<m>\d{2})/(?P<d>\d{2})/(?P<H>\d{2})/(?P<M>\d{2})/(?P<S>\d{2})$",
    // dd-MM-yyyy-hh-mm-ss
    r"^(?P<d>\d{2})-(?P<m>\d{2})-(?P<y>\d{4})-(?P<H>\d{2})-(?P<M>\d{2})-(?P<S>\d{2})$",
    // yyyy-MM-dd-hh-mm-ss
    r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})-(?P<H>\d{2})-(?P<M>\d{2})-(?P<S>\d{2})$",
];

static ISO_8601_RE: Lazy<Regex> = Lazy::new(|| compile(ISO_8601));
static RFC_2822_RE: Lazy<Regex> = Lazy::new(|| compile(RFC_2822));
static NUMERIC_LAYOUT_RES: Lazy<Vec<Regex>> =
    Lazy::new(|| NUMERIC_LAYOUTS.iter().map(|pattern| compile(pattern)).collect());

fn compile(pattern: &str) -> Regex {
    // Every pattern is a compile-time constant covered by the layout tests.
    Regex::new(pattern).unwrap_or_else(|err| panic!("layout pattern {pattern}: {err}"))
}

/// Tries every known layout against `input`, in a fixed priority order, and
/// parses the first structural match.
///
/// Returns `None` when no layout matches — unparseable text is an expected
/// case, not an error — or when the matched digits do not name a real
/// calendar date (the constructors reject out-of-range fields rather than
/// normalizing them). Matching is shape-only: later layouts are not retried
/// after a structural match fails construction.
pub fn parse_known_format(input: &str) -> Option<CivilDateTime> {
    if let Some(caps) = ISO_8601_RE.captures(input) {
        return parse_iso(input, &caps);
    }
    if RFC_2822_RE.is_match(input) {
        // Already in the shape chrono's RFC 2822 parser accepts, offset
        // marker included; handed over unmodified.
        let instant = chrono::DateTime::parse_from_rfc2822(input).ok()?;
        return CivilDateTime::try_from(instant).ok();
    }
    NUMERIC_LAYOUT_RES
        .iter()
        .find_map(|layout| layout.captures(input))
        .and_then(|caps| civil_from_captures(&caps))
}

fn parse_iso(input: &str, caps: &Captures<'_>) -> Option<CivilDateTime> {
    if caps.name("time").is_none() {
        let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
        return CivilDateTime::try_from(date.and_hms_opt(0, 0, 0)?).ok();
    }
    if caps.name("offset").is_some() {
        let instant = chrono::DateTime::parse_from_rfc3339(input).ok()?;
        return CivilDateTime::try_from(instant).ok();
    }
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    CivilDateTime::try_from(naive).ok()
}

fn civil_from_captures(caps: &Captures<'_>) -> Option<CivilDateTime> {
    CivilDateTime::from_fields(
        group(caps, "y")?,
        group(caps, "m")?,
        group(caps, "d")?,
        group(caps, "H").unwrap_or(0),
        group(caps, "M").unwrap_or(0),
        group(caps, "S").unwrap_or(0),
    )
    .ok()
}

fn group<T: FromStr>(caps: &Captures<'_>, name: &str) -> Option<T> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn fields(value: &CivilDateTime) -> (u16, u8, u8, u8, u8, u8) {
        (
            value.year(),
            value.month(),
            value.day(),
            value.hour(),
            value.minute(),
            value.second(),
        )
    }

    #[test]
    fn test_every_known_layout_decomposes() {
        let cases = [
            // ISO 8601, date-only and full
            ("2023-05-01", (2023, 5, 1, 0, 0, 0)),
            ("2023-05-01T13:45:30", (2023, 5, 1, 13, 45, 30)),
            // RFC 2822
            ("Mon, 01 May 2023 13:45:30 +0000", (2023, 5, 1, 13, 45, 30)),
            // Numeric date-only layouts
            ("01/05/2023", (2023, 5, 1, 0, 0, 0)),
            ("01-05-2023", (2023, 5, 1, 0, 0, 0)),
            ("2023/05/01", (2023, 5, 1, 0, 0, 0)),
            // Space-separated date and time
            ("01/05/2023 13:45:30", (2023, 5, 1, 13, 45, 30)),
            ("01-05-2023 13:45:30", (2023, 5, 1, 13, 45, 30)),
            ("2023/05/01 13:45:30", (2023, 5, 1, 13, 45, 30)),
            ("2023-05-01 13:45:30", (2023, 5, 1, 13, 45, 30)),
            // All six fields delimited
            ("01/05/2023/13/45/30", (2023, 5, 1, 13, 45, 30)),
            ("2023/05/01/13/45/30", (2023, 5, 1, 13, 45, 30)),
            ("01-05-2023-13-45-30", (2023, 5, 1, 13, 45, 30)),
            ("2023-05-01-13-45-30", (2023, 5, 1, 13, 45, 30)),
        ];

        for (input, expected) in cases {
            let parsed = parse_known_format(input)
                .unwrap_or_else(|| panic!("{input} should match a known layout"));
            assert_eq!(fields(&parsed), expected, "fields of {input}");
        }
    }

    #[test]
    fn test_day_first_layouts_put_the_day_first() {
        // 01/05/2023 is the 1st of May, not January 5th
        let parsed = parse_known_format("01/05/2023").unwrap();
        assert_eq!(parsed.day(), 1);
        assert_eq!(parsed.month(), 5);
    }

    #[test]
    fn test_iso_offset_markers() {
        let utc = parse_known_format("2023-05-01T13:45:30Z").unwrap();
        assert_eq!(utc.offset(), FixedOffset::east_opt(0));

        let ist = parse_known_format("2023-05-01T13:45:30+05:30").unwrap();
        assert_eq!(ist.offset(), FixedOffset::east_opt(5 * 3600 + 1800));
        assert_eq!(ist.hour(), 13, "civil fields keep the wall-clock reading");

        let west = parse_known_format("2023-05-01T13:45:30-04:00").unwrap();
        assert_eq!(west.offset(), FixedOffset::west_opt(4 * 3600));

        let floating = parse_known_format("2023-05-01T13:45:30").unwrap();
        assert_eq!(floating.offset(), None);
    }

    #[test]
    fn test_iso_fractional_seconds() {
        let millis = parse_known_format("2023-05-01T13:45:30.123Z").unwrap();
        assert_eq!(millis.millisecond(), 123);

        // Shorter fractions scale to milliseconds
        let tenth = parse_known_format("2023-05-01T13:45:30.5").unwrap();
        assert_eq!(tenth.millisecond(), 500);

        // Without a fraction the sub-second value is zero
        let whole = parse_known_format("2023-05-01T13:45:30").unwrap();
        assert_eq!(whole.millisecond(), 0);
    }

    #[test]
    fn test_rfc_2822_offsets() {
        let utc = parse_known_format("Mon, 01 May 2023 13:45:30 +0000").unwrap();
        assert_eq!(utc.offset(), FixedOffset::east_opt(0));

        let ahead = parse_known_format("Mon, 01 May 2023 13:45:30 +0530").unwrap();
        assert_eq!(ahead.offset(), FixedOffset::east_opt(5 * 3600 + 1800));

        let behind = parse_known_format("Mon, 01 May 2023 13:45:30 -0430").unwrap();
        assert_eq!(behind.offset(), FixedOffset::west_opt(4 * 3600 + 1800));
    }

    #[test]
    fn test_rfc_2822_names_are_validated() {
        // The shape matches but May 1st 2023 was a Monday
        assert_eq!(parse_known_format("Tue, 01 May 2023 13:45:30 +0000"), None);
        // Unknown month name
        assert_eq!(parse_known_format("Mon, 01 Zzz 2023 13:45:30 +0000"), None);
    }

    #[test]
    fn test_unrecognized_text_is_none() {
        let inputs = [
            "not a date",
            "",
            "2023-5-1",
            "1/5/2023",
            "01.05.2023",
            "2023-05-01T13:45",
            "01/05/2023T13:45:30",
            "2023-05-01 13:45:30 extra",
        ];
        for input in inputs {
            assert_eq!(parse_known_format(input), None, "{input:?} should not match");
        }
    }

    #[test]
    fn test_shape_match_with_impossible_fields_is_none() {
        // Structurally these fit a layout; the digits name no real date, and
        // construction rejects them without retrying later layouts.
        assert_eq!(parse_known_format("32/13/9999"), None);
        assert_eq!(parse_known_format("29/02/2023"), None);
        assert_eq!(parse_known_format("01/05/2023 25:00:00"), None);
        assert_eq!(parse_known_format("2023-05-01T99:99:99"), None);
    }

    #[test]
    fn test_leap_day_parses_in_leap_years() {
        let parsed = parse_known_format("29/02/2024").unwrap();
        assert_eq!(fields(&parsed), (2024, 2, 29, 0, 0, 0));
    }

    #[test]
    fn test_detection_is_idempotent() {
        let first = parse_known_format("01/05/2023/13/45/30");
        let second = parse_known_format("01/05/2023/13/45/30");
        assert_eq!(first, second);
    }
}
