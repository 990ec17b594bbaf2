use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::num::NonZeroU64;

/// Average length of a Gregorian year: 365.2425 days.
pub const AVERAGE_YEAR: NonZeroU64 = match NonZeroU64::new(31_556_952_000) {
    Some(ms) => ms,
    None => unreachable!(),
};

/// Counts the whole periods of `period_ms` milliseconds elapsed between `anchor` and `now`.
///
/// The count is floored, so an anchor in the future yields a negative value.
///
/// # Examples
///
/// ```
/// # use chrono::{TimeZone, Utc};
/// # use sitedate_core::age::{elapsed_periods, AVERAGE_YEAR};
/// let anchor = Utc.with_ymd_and_hms(2003, 9, 29, 0, 0, 0).unwrap();
/// let now = Utc.with_ymd_and_hms(2025, 9, 29, 0, 0, 0).unwrap();
///
/// assert_eq!(elapsed_periods(anchor, now, AVERAGE_YEAR), 22);
/// assert_eq!(elapsed_periods(now, anchor, AVERAGE_YEAR), -23);
/// ```
pub fn elapsed_periods(anchor: DateTime<Utc>, now: DateTime<Utc>, period_ms: NonZeroU64) -> i64 {
    let elapsed = i128::from((now - anchor).num_milliseconds());
    let period = i128::from(period_ms.get());
    elapsed.div_euclid(period) as i64
}

/// Whole average years between midnight UTC of `anchor` and `now`.
pub fn age_at(anchor: NaiveDate, now: DateTime<Utc>) -> i64 {
    let anchor = anchor.and_time(NaiveTime::MIN).and_utc();
    elapsed_periods(anchor, now, AVERAGE_YEAR)
}

/// [`age_at`] evaluated against the current wall clock.
pub fn age(anchor: NaiveDate) -> i64 {
    age_at(anchor, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(2003, 9, 29).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn birthday_crosses_the_boundary() {
        assert_eq!(age_at(birth(), midnight(2025, 9, 29)), 22);
        assert_eq!(age_at(birth(), midnight(2025, 9, 28)), 21);
    }

    #[test]
    fn anchor_itself_is_zero() {
        assert_eq!(age_at(birth(), midnight(2003, 9, 29)), 0);
    }

    #[test]
    fn future_anchor_is_negative() {
        assert_eq!(age_at(birth(), midnight(2003, 9, 28)), -1);
        assert_eq!(age_at(birth(), midnight(1990, 1, 1)), -14);
    }

    #[test]
    fn monotonic_and_steps_by_one() {
        let anchor = midnight(2003, 9, 29);
        let mut previous = elapsed_periods(anchor, anchor, AVERAGE_YEAR);
        let mut now = anchor;
        for _ in 0..(30 * 365) {
            now += Duration::days(1);
            let current = elapsed_periods(anchor, now, AVERAGE_YEAR);
            assert!(current == previous || current == previous + 1);
            previous = current;
        }
        assert_eq!(previous, 29);
    }

    #[test]
    fn custom_periods() {
        let week = NonZeroU64::new(7 * 24 * 3600 * 1000).unwrap();
        let anchor = midnight(2024, 1, 1);
        assert_eq!(elapsed_periods(anchor, midnight(2024, 1, 15), week), 2);
        assert_eq!(elapsed_periods(anchor, midnight(2024, 1, 14), week), 1);
        assert_eq!(elapsed_periods(anchor, midnight(2023, 12, 31), week), -1);
    }
}
