//! BCP-47 locale tags and the per-locale layout conventions used to assemble a
//! date string (field order, separators, suffixes, hour cycle).

use crate::error::FormatError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// A validated `language[-Script][-REGION][-variant...]` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTag {
    tag: String,
    language: String,
    script: Option<String>,
    region: Option<String>,
}

/// Order of the day, month and year fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourCycle {
    /// 1-12 with a day period (AM/PM).
    H12,
    /// 0-23.
    H23,
}

/// How a locale lays out the fields of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conventions {
    /// Order when the month is written as a name.
    pub text_order: FieldOrder,
    /// Order when every field is numeric.
    pub numeric_order: FieldOrder,
    pub numeric_separator: &'static str,
    /// Glue between fields when the month is a name (`" "`, or `""` for CJK).
    pub text_joiner: &'static str,
    pub year_suffix: &'static str,
    /// When set, a named month is written as its number followed by this suffix.
    pub month_suffix: &'static str,
    pub day_suffix: &'static str,
    pub hour_cycle: HourCycle,
}

impl Conventions {
    const fn new(order: FieldOrder, separator: &'static str, hour_cycle: HourCycle) -> Self {
        Self {
            text_order: order,
            numeric_order: order,
            numeric_separator: separator,
            text_joiner: " ",
            year_suffix: "",
            month_suffix: "",
            day_suffix: "",
            hour_cycle,
        }
    }
}

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i)([a-z]{2,3})(?:-([a-z]{4}))?(?:-([a-z]{2}|[0-9]{3}))?((?:-[a-z0-9]{1,8})*)$",
    )
    .expect("locale tag regex is valid")
});

impl LocaleTag {
    /// Validates and normalizes a tag: `EN_us` becomes `en-US`.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        let normalized = input.trim().replace('_', "-");
        let caps = TAG_RE
            .captures(&normalized)
            .ok_or_else(|| FormatError::InvalidLocale {
                tag: input.to_string(),
            })?;

        let language = caps[1].to_ascii_lowercase();
        let script = caps.get(2).map(|m| {
            let s = m.as_str().to_ascii_lowercase();
            let mut chars = s.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => s,
            }
        });
        let region = caps.get(3).map(|m| m.as_str().to_ascii_uppercase());
        let rest = caps.get(4).map(|m| m.as_str()).unwrap_or("");

        let mut tag = language.clone();
        if let Some(s) = &script {
            tag.push('-');
            tag.push_str(s);
        }
        if let Some(r) = &region {
            tag.push('-');
            tag.push_str(r);
        }
        tag.push_str(&rest.to_ascii_lowercase());

        Ok(Self {
            tag,
            language,
            script,
            region,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.tag
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Resolves the chrono locale whose month and weekday names we render.
    ///
    /// Tries `lang_REGION` first, then the language's primary region.
    pub fn chrono_locale(&self) -> Result<chrono::Locale, FormatError> {
        let mut candidates = Vec::with_capacity(2);
        if let Some(region) = &self.region {
            candidates.push(format!("{}_{}", self.language, region));
        }
        candidates.push(format!(
            "{}_{}",
            self.language,
            primary_region(&self.language)
        ));

        candidates
            .iter()
            .find_map(|name| chrono::Locale::try_from(name.as_str()).ok())
            .ok_or_else(|| FormatError::UnsupportedLocale {
                tag: self.tag.clone(),
            })
    }

    pub fn conventions(&self) -> Conventions {
        use FieldOrder::*;
        use HourCycle::*;

        match self.language.as_str() {
            "en" => match self.region.as_deref() {
                None | Some("US") | Some("PH") | Some("CA") => {
                    Conventions::new(MonthDayYear, "/", H12)
                }
                Some("GB") | Some("IE") => Conventions::new(DayMonthYear, "/", H23),
                _ => Conventions::new(DayMonthYear, "/", H12),
            },
            "de" | "da" | "nb" | "no" | "fi" | "cs" | "sk" => Conventions {
                day_suffix: ".",
                ..Conventions::new(DayMonthYear, ".", H23)
            },
            "ru" | "pl" | "tr" | "uk" => Conventions::new(DayMonthYear, ".", H23),
            "nl" => Conventions::new(DayMonthYear, "-", H23),
            "sv" | "lt" => Conventions {
                text_order: DayMonthYear,
                ..Conventions::new(YearMonthDay, "-", H23)
            },
            "ja" | "zh" => Conventions {
                text_joiner: "",
                year_suffix: "年",
                month_suffix: "月",
                day_suffix: "日",
                ..Conventions::new(YearMonthDay, "/", H23)
            },
            "ko" => Conventions {
                year_suffix: "년",
                month_suffix: "월",
                day_suffix: "일",
                ..Conventions::new(YearMonthDay, ". ", H12)
            },
            _ => Conventions::new(DayMonthYear, "/", H23),
        }
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// Region used when a tag carries only a language (`fr` renders as `fr_FR`).
fn primary_region(language: &str) -> String {
    match language {
        "en" => "US",
        "ja" => "JP",
        "zh" => "CN",
        "ko" => "KR",
        "sv" => "SE",
        "da" => "DK",
        "nb" | "no" => "NO",
        "cs" => "CZ",
        "el" => "GR",
        "uk" => "UA",
        "he" => "IL",
        "ca" => "ES",
        "hi" => "IN",
        other => return other.to_ascii_uppercase(),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_separator() {
        let tag = LocaleTag::parse("EN_us").unwrap();
        assert_eq!(tag.as_str(), "en-US");
        assert_eq!(tag.language(), "en");
        assert_eq!(tag.region(), Some("US"));
        assert_eq!(tag.script(), None);
    }

    #[test]
    fn parse_keeps_script_and_variants() {
        let tag = LocaleTag::parse("zh-hant-TW").unwrap();
        assert_eq!(tag.as_str(), "zh-Hant-TW");
        assert_eq!(tag.script(), Some("Hant"));

        let tag = LocaleTag::parse("de-DE-u-co-phonebk").unwrap();
        assert_eq!(tag.region(), Some("DE"));
        assert_eq!(tag.as_str(), "de-DE-u-co-phonebk");
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "e", "english", "en-", "en US", "12-US"] {
            assert_eq!(
                LocaleTag::parse(bad),
                Err(FormatError::InvalidLocale {
                    tag: bad.to_string()
                }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn chrono_locale_uses_region_then_primary_region() {
        let us = LocaleTag::parse("en-US").unwrap().chrono_locale().unwrap();
        assert_eq!(us, chrono::Locale::en_US);

        let fr = LocaleTag::parse("fr").unwrap().chrono_locale().unwrap();
        assert_eq!(fr, chrono::Locale::fr_FR);

        // No `fr_US` locale exists, so the language's home region is used.
        let fr_us = LocaleTag::parse("fr-US").unwrap().chrono_locale().unwrap();
        assert_eq!(fr_us, chrono::Locale::fr_FR);
    }

    #[test]
    fn chrono_locale_reports_unknown_languages() {
        let tag = LocaleTag::parse("qq-ZZ").unwrap();
        assert_eq!(
            tag.chrono_locale(),
            Err(FormatError::UnsupportedLocale {
                tag: "qq-ZZ".into()
            })
        );
    }

    #[test]
    fn conventions_by_region() {
        let us = LocaleTag::parse("en-US").unwrap().conventions();
        assert_eq!(us.text_order, FieldOrder::MonthDayYear);
        assert_eq!(us.hour_cycle, HourCycle::H12);

        let gb = LocaleTag::parse("en-GB").unwrap().conventions();
        assert_eq!(gb.text_order, FieldOrder::DayMonthYear);
        assert_eq!(gb.hour_cycle, HourCycle::H23);

        let sv = LocaleTag::parse("sv-SE").unwrap().conventions();
        assert_eq!(sv.numeric_order, FieldOrder::YearMonthDay);
        assert_eq!(sv.text_order, FieldOrder::DayMonthYear);
    }
}
