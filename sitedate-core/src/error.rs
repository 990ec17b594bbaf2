use thiserror::Error;

/// Everything that can go wrong while building a formatter or formatting a date.
///
/// Locale and time-zone variants come from configuration and are expected at
/// startup; date variants come from the value handed to `format`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid date: '{input}'")]
    InvalidDate { input: String },
    #[error("timestamp {millis} ms is outside the representable date range")]
    OutOfRange { millis: i64 },
    #[error("'{tag}' is not a well-formed locale tag")]
    InvalidLocale { tag: String },
    #[error("locale '{tag}' is not supported")]
    UnsupportedLocale { tag: String },
    #[error("unknown time zone '{zone}' (expected \"UTC\", \"local\" or an offset like \"+02:00\")")]
    InvalidTimeZone { zone: String },
}
