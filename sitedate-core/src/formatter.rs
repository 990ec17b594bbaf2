//! Locale-aware date formatting.
//!
//! A [`DateFormatter`] is built once from a locale tag and a set of
//! [`FormatOptions`]. Building it validates the locale and time zone and
//! compiles the options into a list of tokens laid out according to the
//! locale's conventions, so formatting a date only has to resolve the input
//! and render those tokens.

use crate::error::FormatError;
use crate::input::DateInput;
use crate::locale::{Conventions, FieldOrder, HourCycle, LocaleTag};
use crate::options::{FormatOptions, MonthStyle, NumericStyle, TextStyle};
use crate::zone::Zone;
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Weekday(TextStyle),
    Year(NumericStyle),
    Month(MonthStyle),
    Day(NumericStyle),
    Hour(NumericStyle, HourCycle),
    Minute(NumericStyle),
    Second(NumericStyle),
    DayPeriod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(&'static str),
    Field(Field),
}

#[derive(Debug, Clone)]
pub struct DateFormatter {
    locale: LocaleTag,
    chrono_locale: chrono::Locale,
    options: FormatOptions,
    zone: Zone,
    tokens: Vec<Token>,
}

impl DateFormatter {
    /// Builds a formatter for `locale` (a BCP-47 tag such as `en-US`).
    ///
    /// Fails when the tag is malformed, when no locale data exists for it, or
    /// when `options.time_zone` is not understood.
    pub fn new(locale: &str, options: FormatOptions) -> Result<Self, FormatError> {
        let locale = LocaleTag::parse(locale)?;
        let chrono_locale = locale.chrono_locale()?;
        let zone = Zone::parse(options.time_zone.as_deref())?;
        let tokens = compile(&options, &locale.conventions());
        log::debug!(
            "compiled date formatter for {locale} ({} tokens, zone {zone:?})",
            tokens.len()
        );

        Ok(Self {
            locale,
            chrono_locale,
            options,
            zone,
            tokens,
        })
    }

    /// One-shot formatting with an explicit locale and options.
    pub fn to_locale_string(
        input: impl Into<DateInput>,
        locale: &str,
        options: FormatOptions,
    ) -> Result<String, FormatError> {
        Self::new(locale, options)?.format(input)
    }

    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Formats `input` with this formatter's locale and options.
    pub fn format(&self, input: impl Into<DateInput>) -> Result<String, FormatError> {
        let instant = input.into().resolve(&self.zone)?;
        Ok(self.format_instant(&instant))
    }

    /// Formats `input` with this formatter's options shallow-merged with
    /// `overrides`. Builds a throwaway formatter for the call.
    pub fn format_with(
        &self,
        input: impl Into<DateInput>,
        overrides: &FormatOptions,
    ) -> Result<String, FormatError> {
        let merged = self.options.merged(overrides);
        let formatter = DateFormatter::new(self.locale.as_str(), merged)?;
        formatter.format(input)
    }

    pub fn format_instant(&self, instant: &DateTime<Utc>) -> String {
        let view = self.zone.view(instant);
        let mut out = String::with_capacity(32);
        for token in &self.tokens {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::Field(field) => self.render_field(&mut out, &view, *field),
            }
        }
        out
    }

    fn render_field(&self, out: &mut String, view: &DateTime<FixedOffset>, field: Field) {
        match field {
            Field::Weekday(TextStyle::Long) => self.push_name(out, view, "%A"),
            Field::Weekday(TextStyle::Short) => self.push_name(out, view, "%a"),
            Field::Weekday(TextStyle::Narrow) => self.push_initial(out, view, "%A"),
            Field::Year(NumericStyle::Numeric) => {
                let year = view.format("%Y").to_string();
                out.push_str(&strip_year_padding(&year));
            }
            Field::Year(NumericStyle::TwoDigit) => self.push_raw(out, view, "%y"),
            Field::Month(MonthStyle::Numeric) => self.push_raw(out, view, "%-m"),
            Field::Month(MonthStyle::TwoDigit) => self.push_raw(out, view, "%m"),
            Field::Month(MonthStyle::Long) => self.push_name(out, view, "%B"),
            Field::Month(MonthStyle::Short) => self.push_name(out, view, "%b"),
            Field::Month(MonthStyle::Narrow) => self.push_initial(out, view, "%B"),
            Field::Day(NumericStyle::Numeric) => self.push_raw(out, view, "%-d"),
            Field::Day(NumericStyle::TwoDigit) => self.push_raw(out, view, "%d"),
            Field::Hour(NumericStyle::Numeric, HourCycle::H12) => self.push_raw(out, view, "%-I"),
            Field::Hour(NumericStyle::TwoDigit, HourCycle::H12) => self.push_raw(out, view, "%I"),
            Field::Hour(NumericStyle::Numeric, HourCycle::H23) => self.push_raw(out, view, "%-H"),
            Field::Hour(NumericStyle::TwoDigit, HourCycle::H23) => self.push_raw(out, view, "%H"),
            Field::Minute(NumericStyle::Numeric) => self.push_raw(out, view, "%-M"),
            Field::Minute(NumericStyle::TwoDigit) => self.push_raw(out, view, "%M"),
            Field::Second(NumericStyle::Numeric) => self.push_raw(out, view, "%-S"),
            Field::Second(NumericStyle::TwoDigit) => self.push_raw(out, view, "%S"),
            Field::DayPeriod => {
                let period = self.localized(view, "%p");
                let period = period.trim();
                if !period.is_empty() {
                    out.push(' ');
                    out.push_str(period);
                }
            }
        }
    }

    fn localized(&self, view: &DateTime<FixedOffset>, item: &str) -> String {
        view.format_localized(item, self.chrono_locale).to_string()
    }

    fn push_raw(&self, out: &mut String, view: &DateTime<FixedOffset>, item: &str) {
        let _ = write!(out, "{}", view.format(item));
    }

    fn push_name(&self, out: &mut String, view: &DateTime<FixedOffset>, item: &str) {
        out.push_str(self.localized(view, item).trim());
    }

    fn push_initial(&self, out: &mut String, view: &DateTime<FixedOffset>, item: &str) {
        if let Some(c) = self.localized(view, item).trim().chars().next() {
            out.extend(c.to_uppercase());
        }
    }
}

/// `%Y` pads to four digits; numeric years are written without padding.
fn strip_year_padding(year: &str) -> String {
    let (sign, digits) = match year.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", year.strip_prefix('+').unwrap_or(year)),
    };
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        "0".to_string()
    } else {
        format!("{sign}{digits}")
    }
}

fn compile(options: &FormatOptions, conv: &Conventions) -> Vec<Token> {
    let fallback;
    let options = if options.has_date_fields() || options.has_time_fields() {
        options
    } else {
        fallback = FormatOptions {
            year: Some(NumericStyle::Numeric),
            month: Some(MonthStyle::Numeric),
            day: Some(NumericStyle::Numeric),
            ..options.clone()
        };
        &fallback
    };

    let date = compile_date(options, conv);
    let time = compile_time(options, conv);

    let mut tokens = date;
    if !tokens.is_empty() && !time.is_empty() {
        tokens.push(Token::Literal(", "));
    }
    tokens.extend(time);
    tokens
}

fn compile_date(o: &FormatOptions, conv: &Conventions) -> Vec<Token> {
    let has_ymd = o.year.is_some() || o.month.is_some() || o.day.is_some();
    let mut body = Vec::new();
    let mut suffixed = false;

    match o.month {
        Some(month) if month.is_text() => {
            let cjk_like = !conv.year_suffix.is_empty();
            suffixed = cjk_like;
            match conv.text_order {
                FieldOrder::MonthDayYear => {
                    body.push(Token::Field(Field::Month(month)));
                    if let Some(day) = o.day {
                        body.push(Token::Literal(" "));
                        body.push(Token::Field(Field::Day(day)));
                    }
                    if let Some(year) = o.year {
                        if o.day.is_some() {
                            body.push(Token::Literal(","));
                        }
                        body.push(Token::Literal(" "));
                        body.push(Token::Field(Field::Year(year)));
                    }
                }
                FieldOrder::DayMonthYear => {
                    if let Some(day) = o.day {
                        body.push(Token::Field(Field::Day(day)));
                        push_literal(&mut body, conv.day_suffix);
                        body.push(Token::Literal(" "));
                    }
                    body.push(Token::Field(Field::Month(month)));
                    if let Some(year) = o.year {
                        body.push(Token::Literal(" "));
                        body.push(Token::Field(Field::Year(year)));
                    }
                }
                FieldOrder::YearMonthDay => {
                    if let Some(year) = o.year {
                        body.push(Token::Field(Field::Year(year)));
                        push_literal(&mut body, conv.year_suffix);
                        push_literal(&mut body, conv.text_joiner);
                    }
                    if conv.month_suffix.is_empty() {
                        body.push(Token::Field(Field::Month(month)));
                    } else {
                        body.push(Token::Field(Field::Month(MonthStyle::Numeric)));
                        push_literal(&mut body, conv.month_suffix);
                    }
                    if let Some(day) = o.day {
                        push_literal(&mut body, conv.text_joiner);
                        body.push(Token::Field(Field::Day(day)));
                        push_literal(&mut body, conv.day_suffix);
                    }
                }
            }
        }
        _ if has_ymd => {
            let month = o.month.map(|m| Token::Field(Field::Month(m)));
            let day = o.day.map(|d| Token::Field(Field::Day(d)));
            let year = o.year.map(|y| Token::Field(Field::Year(y)));
            let ordered = match conv.numeric_order {
                FieldOrder::MonthDayYear => [month, day, year],
                FieldOrder::DayMonthYear => [day, month, year],
                FieldOrder::YearMonthDay => [year, month, day],
            };
            for token in ordered.into_iter().flatten() {
                if !body.is_empty() {
                    body.push(Token::Literal(conv.numeric_separator));
                }
                body.push(token);
            }
        }
        _ => {}
    }

    let Some(weekday) = o.weekday else {
        return body;
    };
    let weekday = Token::Field(Field::Weekday(weekday));
    if body.is_empty() {
        vec![weekday]
    } else if suffixed {
        push_literal(&mut body, conv.text_joiner);
        body.push(weekday);
        body
    } else {
        let mut tokens = vec![weekday, Token::Literal(", ")];
        tokens.extend(body);
        tokens
    }
}

fn compile_time(o: &FormatOptions, conv: &Conventions) -> Vec<Token> {
    let cycle = match o.hour12 {
        Some(true) => HourCycle::H12,
        Some(false) => HourCycle::H23,
        None => conv.hour_cycle,
    };
    let mut tokens = Vec::new();

    if let Some(hour) = o.hour {
        tokens.push(Token::Field(Field::Hour(hour, cycle)));
    }
    if let Some(minute) = o.minute {
        if !tokens.is_empty() {
            tokens.push(Token::Literal(":"));
        }
        // Minutes after an hour are always two digits.
        let minute = if o.hour.is_some() { NumericStyle::TwoDigit } else { minute };
        tokens.push(Token::Field(Field::Minute(minute)));
    }
    if let Some(second) = o.second {
        if !tokens.is_empty() {
            tokens.push(Token::Literal(":"));
        }
        let second = if o.minute.is_some() { NumericStyle::TwoDigit } else { second };
        tokens.push(Token::Field(Field::Second(second)));
    }
    if o.hour.is_some() && cycle == HourCycle::H12 {
        tokens.push(Token::Field(Field::DayPeriod));
    }
    tokens
}

fn push_literal(tokens: &mut Vec<Token>, s: &'static str) {
    if !s.is_empty() {
        tokens.push(Token::Literal(s));
    }
}
