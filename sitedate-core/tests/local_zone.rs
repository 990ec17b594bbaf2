//! `time_zone = "local"` reads the machine zone from `TZ`, which is process-wide,
//! so these checks live in their own test binary and run as a single test.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use sitedate_core::zone::Zone;
use sitedate_core::{DateFormatter, DateInput, FormatError, FormatOptions, NumericStyle};

/// Central European time: the clocks skip 02:00-03:00 on 2024-03-31 and repeat
/// 02:00-03:00 on 2024-10-27.
const CENTRAL_EUROPE: &str = "CET-1CEST,M3.5.0,M10.5.0/3";

fn wall_clock(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[test]
fn local_zone_follows_daylight_saving() {
    // SAFETY: no other thread runs in this binary while the variable is set.
    unsafe { std::env::set_var("TZ", CENTRAL_EUROPE) };

    // Skipped by the spring transition.
    let skipped = wall_clock(2024, 3, 31, 2, 30);
    assert_eq!(Zone::Local.localize(&skipped), None);
    assert_eq!(
        DateInput::DateTime(skipped).resolve(&Zone::Local),
        Err(FormatError::InvalidDate {
            input: skipped.to_string()
        })
    );

    // Repeated by the autumn transition: the earlier (summer time) instant wins.
    let repeated = wall_clock(2024, 10, 27, 2, 30);
    assert_eq!(
        DateInput::DateTime(repeated).resolve(&Zone::Local).unwrap(),
        Utc.with_ymd_and_hms(2024, 10, 27, 0, 30, 0).unwrap()
    );

    // Viewing shifts into whichever offset is in force at the instant.
    let summer = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    assert_eq!(Zone::Local.view(&summer).to_rfc3339(), "2024-07-01T14:00:00+02:00");
    assert_eq!(Zone::Local.view(&winter).to_rfc3339(), "2024-01-15T13:00:00+01:00");

    let options = FormatOptions {
        hour: Some(NumericStyle::Numeric),
        minute: Some(NumericStyle::Numeric),
        time_zone: Some("local".to_string()),
        ..FormatOptions::long_date()
    };
    let formatter = DateFormatter::new("en-GB", options).unwrap();
    assert_eq!(formatter.format(summer).unwrap(), "1 July 2024, 14:00");
    assert_eq!(
        formatter.format("2024-03-31T02:30"),
        Err(FormatError::InvalidDate {
            input: "2024-03-31T02:30".to_string()
        })
    );
}
