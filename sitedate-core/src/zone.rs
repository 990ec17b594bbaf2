use crate::error::FormatError;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// The zone dates are displayed in, and in which wall-clock inputs are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Utc,
    /// The zone of the machine doing the formatting.
    Local,
    Fixed(FixedOffset),
}

static OFFSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:UTC|GMT)?([+-])(\d{1,2})(?::?(\d{2}))?$").expect("offset regex is valid")
});

impl Zone {
    /// Accepts `UTC`/`GMT`/`Z`, `local`, and offsets such as `+02:00`, `-0530`
    /// or `UTC+1`. `None` means UTC.
    pub fn parse(input: Option<&str>) -> Result<Self, FormatError> {
        let Some(raw) = input else {
            return Ok(Zone::Utc);
        };
        let s = raw.trim();
        if s.eq_ignore_ascii_case("utc") || s.eq_ignore_ascii_case("gmt") || s == "Z" {
            return Ok(Zone::Utc);
        }
        if s.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }

        let invalid = || FormatError::InvalidTimeZone {
            zone: raw.to_string(),
        };
        let caps = OFFSET_RE.captures(s).ok_or_else(invalid)?;
        let hours: i32 = caps[2].parse().map_err(|_| invalid())?;
        let minutes: i32 = match caps.get(3) {
            Some(m) => m.as_str().parse().map_err(|_| invalid())?,
            None => 0,
        };
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        let sign = if &caps[1] == "-" { -1 } else { 1 };
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Zone::Fixed)
            .ok_or_else(invalid)
    }

    /// Reads a wall-clock time in this zone. `None` when the time does not
    /// exist (skipped by a DST transition); ambiguous times take the earlier instant.
    pub fn localize(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Utc => Some(Utc.from_utc_datetime(naive)),
            Zone::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Fixed(offset) => offset
                .from_local_datetime(naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// The instant as seen on a wall clock in this zone.
    pub fn view(&self, instant: &DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Utc => instant.fixed_offset(),
            Zone::Local => {
                let local = instant.with_timezone(&Local);
                local.with_timezone(local.offset())
            }
            Zone::Fixed(offset) => instant.with_timezone(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn offset(secs: i32) -> Zone {
        Zone::Fixed(FixedOffset::east_opt(secs).unwrap())
    }

    #[test]
    fn parse_named_zones() {
        assert_eq!(Zone::parse(None).unwrap(), Zone::Utc);
        assert_eq!(Zone::parse(Some("utc")).unwrap(), Zone::Utc);
        assert_eq!(Zone::parse(Some("GMT")).unwrap(), Zone::Utc);
        assert_eq!(Zone::parse(Some("Local")).unwrap(), Zone::Local);
    }

    #[test]
    fn parse_offsets() {
        assert_eq!(Zone::parse(Some("+02:00")).unwrap(), offset(7200));
        assert_eq!(Zone::parse(Some("-0530")).unwrap(), offset(-(5 * 3600 + 30 * 60)));
        assert_eq!(Zone::parse(Some("UTC+1")).unwrap(), offset(3600));
    }

    #[test]
    fn parse_rejects_unknown_zones() {
        for bad in ["Mars/Olympus", "+25:00", "+02:75", ""] {
            assert!(
                matches!(Zone::parse(Some(bad)), Err(FormatError::InvalidTimeZone { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn localize_in_fixed_offset() {
        let naive = NaiveDate::from_ymd_opt(2024, 4, 23)
            .unwrap()
            .and_hms_opt(2, 0, 0)
            .unwrap();
        let instant = offset(7200).localize(&naive).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-04-23T00:00:00+00:00");
    }

    #[test]
    fn view_shifts_into_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 4, 23, 23, 30, 0).unwrap();
        assert_eq!(Zone::Utc.view(&instant).format("%-d %H:%M").to_string(), "23 23:30");
        assert_eq!(offset(3600).view(&instant).format("%-d %H:%M").to_string(), "24 00:30");
    }
}
