//! The process-wide site can only be installed once per process, so these
//! checks live in their own test binary and run as a single test.

use chrono::NaiveDate;
use sitedate_core::{FormatOptions, MonthStyle, SiteConfig, format_date, site};

#[test]
fn global_site_is_installed_once_and_shared() {
    let config = SiteConfig {
        title: "Integration".to_string(),
        age_anchor: NaiveDate::from_ymd_opt(2003, 9, 29),
        ..Default::default()
    };

    let installed = site::install(config).unwrap();
    assert_eq!(installed.config().title, "Integration");

    // Later lookups hand back the same instance.
    let again = site::global().unwrap();
    assert!(std::ptr::eq(installed, again));

    // A second install is refused and leaves the first one in place.
    assert!(site::install(SiteConfig::default()).is_err());
    assert_eq!(site::global().unwrap().config().title, "Integration");

    let date = NaiveDate::from_ymd_opt(2024, 4, 23).unwrap();
    assert_eq!(format_date(date, None).unwrap(), "April 23, 2024");
    assert_eq!(
        format_date(1_713_830_400_000_i64, None).unwrap(),
        format_date("2024-04-23T00:00:00Z", None).unwrap()
    );

    let short = FormatOptions {
        month: Some(MonthStyle::Short),
        ..Default::default()
    };
    assert_eq!(
        format_date("2024-04-23T00:00:00Z", Some(&short)).unwrap(),
        "Apr 23, 2024"
    );

    let err = format_date("not a date", None).unwrap_err();
    assert!(err.to_string().contains("not a date"));

    let readers: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || format_date(date, None).unwrap()))
        .collect();
    for reader in readers {
        assert_eq!(reader.join().unwrap(), "April 23, 2024");
    }
}
