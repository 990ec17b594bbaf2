//! Formatting knobs for dates, modelled on the usual `year`/`month`/`day`
//! presentation styles.
//!
//! Every knob is optional. A formatter built from an empty set falls back to a
//! numeric `year`/`month`/`day` date.

use serde::Deserialize;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Presentation of a name-like field (weekday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, EnumIter, AsRefStr, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TextStyle {
    Long,
    Short,
    Narrow,
}

/// Presentation of a purely numeric field (year, day, hour, minute, second).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, EnumIter, AsRefStr, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NumericStyle {
    Numeric,
    #[serde(rename = "2-digit")]
    #[strum(serialize = "2-digit")]
    TwoDigit,
}

/// Months can be written either as numbers or as names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, EnumIter, AsRefStr, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MonthStyle {
    Numeric,
    #[serde(rename = "2-digit")]
    #[strum(serialize = "2-digit")]
    TwoDigit,
    Long,
    Short,
    Narrow,
}

impl MonthStyle {
    /// `true` when the month is rendered as a (localized) name.
    pub fn is_text(self) -> bool {
        matches!(self, MonthStyle::Long | MonthStyle::Short | MonthStyle::Narrow)
    }
}

/// The recognized formatting options.
///
/// In TOML:
///
/// ```toml
/// [date.options]
/// year = "numeric"
/// month = "long"
/// day = "numeric"
/// time_zone = "UTC"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatOptions {
    pub weekday: Option<TextStyle>,
    pub year: Option<NumericStyle>,
    pub month: Option<MonthStyle>,
    pub day: Option<NumericStyle>,
    pub hour: Option<NumericStyle>,
    pub minute: Option<NumericStyle>,
    pub second: Option<NumericStyle>,
    /// Force a 12-hour (`true`) or 24-hour (`false`) clock. Unset uses the locale default.
    pub hour12: Option<bool>,
    /// `"UTC"`, `"local"` or a fixed offset such as `"+02:00"`. Unset means UTC.
    pub time_zone: Option<String>,
}

impl FormatOptions {
    /// `{ year: numeric, month: long, day: numeric }`, e.g. `April 23, 2024`.
    pub fn long_date() -> Self {
        Self {
            year: Some(NumericStyle::Numeric),
            month: Some(MonthStyle::Long),
            day: Some(NumericStyle::Numeric),
            ..Default::default()
        }
    }

    /// Shallow merge: every knob set in `overrides` wins, every knob it leaves
    /// unset is inherited from `self`.
    pub fn merged(&self, overrides: &FormatOptions) -> FormatOptions {
        FormatOptions {
            weekday: overrides.weekday.or(self.weekday),
            year: overrides.year.or(self.year),
            month: overrides.month.or(self.month),
            day: overrides.day.or(self.day),
            hour: overrides.hour.or(self.hour),
            minute: overrides.minute.or(self.minute),
            second: overrides.second.or(self.second),
            hour12: overrides.hour12.or(self.hour12),
            time_zone: overrides
                .time_zone
                .clone()
                .or_else(|| self.time_zone.clone()),
        }
    }

    pub fn has_date_fields(&self) -> bool {
        self.weekday.is_some() || self.year.is_some() || self.month.is_some() || self.day.is_some()
    }

    pub fn has_time_fields(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }
}
