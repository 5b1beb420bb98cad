//! Domain Services
//!
//! Pure window arithmetic for the badge periods.
//!
//! Boundaries keep the time-of-day of `now`; only the date moves. A visit
//! at 09:00 on the first of the month therefore falls into the previous
//! month's window when the badge is requested at 10:00.

use crate::domain::value_objects::{Period, TimeWindow};
use chrono::{DateTime, Datelike, Duration, Months, Utc};

/// Window for `period` as seen from `now`.
///
/// Returns `None` only if the calendar arithmetic leaves chrono's range.
pub fn window_for(period: Period, now: DateTime<Utc>) -> Option<TimeWindow> {
    match period {
        Period::LastMonth => last_month(now),
        Period::LastWeek => last_week(now),
    }
}

/// Previous calendar month: day 1 of last month up to day 1 of this month.
pub fn last_month(now: DateTime<Utc>) -> Option<TimeWindow> {
    let start = now.with_day(1)?.checked_sub_months(Months::new(1))?;
    let end = start.checked_add_months(Months::new(1))?;
    Some(TimeWindow::new(start, end))
}

/// Previous Monday-aligned week.
pub fn last_week(now: DateTime<Utc>) -> Option<TimeWindow> {
    let days_since_monday = i64::from(now.weekday().num_days_from_monday());
    let start = now.checked_sub_signed(Duration::days(days_since_monday + 7))?;
    let end = start.checked_add_signed(Duration::days(7))?;
    Some(TimeWindow::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_last_month_mid_month() {
        let window = last_month(at(2024, 3, 15, 12, 34, 56)).unwrap();
        assert_eq!(window.start, at(2024, 2, 1, 12, 34, 56));
        assert_eq!(window.end, at(2024, 3, 1, 12, 34, 56));
    }

    #[test]
    fn test_last_month_year_rollover() {
        let window = last_month(at(2024, 1, 10, 8, 0, 0)).unwrap();
        assert_eq!(window.start, at(2023, 12, 1, 8, 0, 0));
        assert_eq!(window.end, at(2024, 1, 1, 8, 0, 0));
    }

    #[test]
    fn test_last_month_from_month_end() {
        // March 31st must not be pushed into "February 31st".
        let window = last_month(at(2024, 3, 31, 23, 59, 59)).unwrap();
        assert_eq!(window.start, at(2024, 2, 1, 23, 59, 59));
        assert_eq!(window.end, at(2024, 3, 1, 23, 59, 59));
    }

    #[test]
    fn test_last_month_into_december_ends_in_january() {
        let window = last_month(at(2025, 1, 31, 0, 0, 0)).unwrap();
        assert_eq!(window.start, at(2024, 12, 1, 0, 0, 0));
        assert_eq!(window.end, at(2025, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_last_week_from_wednesday() {
        let now = at(2024, 3, 13, 17, 5, 0);
        assert_eq!(now.weekday(), Weekday::Wed);

        let window = last_week(now).unwrap();
        assert_eq!(window.start, at(2024, 3, 4, 17, 5, 0));
        assert_eq!(window.start.weekday(), Weekday::Mon);
        assert_eq!(window.end, at(2024, 3, 11, 17, 5, 0));
    }

    #[test]
    fn test_last_week_from_monday_and_sunday() {
        let monday = last_week(at(2024, 3, 11, 1, 0, 0)).unwrap();
        assert_eq!(monday.start, at(2024, 3, 4, 1, 0, 0));

        let sunday = last_week(at(2024, 3, 17, 1, 0, 0)).unwrap();
        assert_eq!(sunday.start, at(2024, 3, 4, 1, 0, 0));
        assert_eq!(sunday.end - sunday.start, Duration::days(7));
    }

    #[test]
    fn test_last_week_across_year_boundary() {
        // 2025-01-01 is a Wednesday.
        let window = last_week(at(2025, 1, 1, 12, 0, 0)).unwrap();
        assert_eq!(window.start, at(2024, 12, 23, 12, 0, 0));
        assert_eq!(window.end, at(2024, 12, 30, 12, 0, 0));
    }

    #[test]
    fn test_window_for_dispatches() {
        let now = at(2024, 3, 15, 0, 0, 0);
        assert_eq!(window_for(Period::LastMonth, now), last_month(now));
        assert_eq!(window_for(Period::LastWeek, now), last_week(now));
    }
}
