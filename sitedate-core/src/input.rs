//! Date-like values accepted by the formatter, and how each one becomes an instant.

use crate::error::FormatError;
use crate::zone::Zone;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Largest absolute timestamp a date may carry: 100 000 000 days either side of the epoch.
pub const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// Wall-clock date-time layouts accepted without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-time layouts with an explicit numeric offset, for the forms RFC 3339 rejects.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

/// `24:00` (optionally `24:00:00` or `24:00:00.000`) closing a date-time.
static END_OF_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)([T ])24:00(?::00(?:\.0+)?)?([Zz]|[+-]\d{2}:?\d{2})?$")
        .expect("end-of-day regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// An ISO-8601 string (`2024-04-23`, `2024-04-23T10:00`, `2024-04-23T10:00:00Z`...).
    /// Expanded years (`+002024-04-23`) are accepted, and `T24:00` is midnight
    /// at the end of the day.
    Iso(String),
    /// A calendar date, read as midnight in the formatter's zone.
    Date(NaiveDate),
    /// A wall-clock date-time, read in the formatter's zone.
    DateTime(NaiveDateTime),
    /// An absolute instant.
    Instant(DateTime<Utc>),
}

impl DateInput {
    /// Turns the input into an instant. Wall-clock values are read in `zone`.
    pub fn resolve(&self, zone: &Zone) -> Result<DateTime<Utc>, FormatError> {
        match self {
            DateInput::EpochMillis(millis) => from_epoch_millis(*millis),
            DateInput::Iso(s) => parse_iso(s, zone),
            DateInput::Date(date) => zone
                .localize(&date.and_time(NaiveTime::MIN))
                .ok_or_else(|| FormatError::InvalidDate {
                    input: date.to_string(),
                }),
            DateInput::DateTime(naive) => {
                zone.localize(naive).ok_or_else(|| FormatError::InvalidDate {
                    input: naive.to_string(),
                })
            }
            DateInput::Instant(instant) => Ok(*instant),
        }
    }
}

fn from_epoch_millis(millis: i64) -> Result<DateTime<Utc>, FormatError> {
    if millis.checked_abs().is_none_or(|abs| abs > MAX_EPOCH_MILLIS) {
        return Err(FormatError::OutOfRange { millis });
    }
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(FormatError::OutOfRange { millis })
}

/// Date-only forms are UTC, date-time forms without an offset are wall-clock
/// time in `zone`, and forms with `Z` or an offset are absolute.
fn parse_iso(input: &str, zone: &Zone) -> Result<DateTime<Utc>, FormatError> {
    let s = input.trim();
    let resolved = match END_OF_DAY_RE.captures(s) {
        Some(caps) => {
            let offset = caps.get(3).map_or("", |m| m.as_str());
            next_midnight(&caps[1], &caps[2], offset).and_then(|s| resolve_iso(&s, zone))
        }
        None => resolve_iso(s, zone),
    };
    resolved.ok_or_else(|| FormatError::InvalidDate {
        input: input.to_string(),
    })
}

fn resolve_iso(s: &str, zone: &Zone) -> Option<DateTime<Utc>> {
    if let Some(date) = parse_date_only(s) {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = s.strip_suffix(['Z', 'z']).and_then(parse_naive) {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    zone.localize(&parse_naive(s)?)
}

/// Rewrites `<date>T24:00<rest>` as `00:00` on the following day.
fn next_midnight(date: &str, separator: &str, rest: &str) -> Option<String> {
    let next = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?.succ_opt()?;
    Some(format!("{}{separator}00:00{rest}", next.format("%Y-%m-%d")))
}

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`. The year may use the expanded `±YYYYYY` form.
fn parse_date_only(s: &str) -> Option<NaiveDate> {
    let (year, rest) = split_year(s)?;
    let (month, day) = match *rest.as_bytes() {
        [] => (1, 1),
        [b'-', m1, m2] => (two_digits(m1, m2)?, 1),
        [b'-', m1, m2, b'-', d1, d2] => (two_digits(m1, m2)?, two_digits(d1, d2)?),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn split_year(s: &str) -> Option<(i32, &str)> {
    let (sign, width, body) = match s.as_bytes().first()? {
        b'+' => (1, 6, &s[1..]),
        b'-' => (-1, 6, &s[1..]),
        _ => (1, 4, s),
    };
    let digits = body.get(..width)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = digits.parse().ok()?;
    // `-000000` is not a valid expanded year.
    if sign < 0 && year == 0 {
        return None;
    }
    Some((sign * year, &body[width..]))
}

fn two_digits(hi: u8, lo: u8) -> Option<u32> {
    (hi.is_ascii_digit() && lo.is_ascii_digit())
        .then(|| u32::from(hi - b'0') * 10 + u32::from(lo - b'0'))
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

impl From<i64> for DateInput {
    fn from(millis: i64) -> Self {
        DateInput::EpochMillis(millis)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Iso(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Iso(s)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(naive: NaiveDateTime) -> Self {
        DateInput::DateTime(naive)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(dt: DateTime<Tz>) -> Self {
        DateInput::Instant(dt.with_timezone(&Utc))
    }
}
