// SPDX-License-Identifier: MIT

//! Shared helpers for calendar-day arithmetic.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Midnight (UTC) of the calendar day containing `at`.
pub fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    day_start(at.date_naive())
}

/// Midnight (UTC) of the given calendar day.
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

/// Whole days elapsed from `from` to `to` (negative if `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_start_of_day_truncates_time() {
        let at = Utc.with_ymd_and_hms(2026, 3, 10, 14, 35, 9).unwrap();
        let start = start_of_day(at);

        assert_eq!(start.date_naive(), at.date_naive());
        assert_eq!(start.hour(), 0);
        assert_eq!(start.minute(), 0);
        assert_eq!(start.second(), 0);
    }

    #[test]
    fn test_days_between() {
        let a = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 3, 13).unwrap();

        assert_eq!(days_between(a, b), 3);
        assert_eq!(days_between(b, a), -3);
        assert_eq!(days_between(a, a), 0);
    }
}
