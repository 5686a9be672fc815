//! Query time window

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use super::error::BuildError;
use crate::descriptor::{DateRange, Frequency};

const SECONDS_IN_A_DAY: i64 = 86_400;

/// Inclusive window in Unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: i64,
    pub to: i64,
}

impl TimeWindow {
    pub fn span(&self) -> i64 {
        self.to - self.from
    }
}

pub(crate) fn start_of_day(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

pub(crate) fn end_of_day(date: NaiveDate) -> i64 {
    start_of_day(date) + SECONDS_IN_A_DAY - 1
}

/// First day of the week containing `date`
pub(crate) fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let today = date.weekday().num_days_from_monday() as i64;
    let first = week_start.num_days_from_monday() as i64;
    let back = (7 + today - first) % 7;
    date - Duration::days(back)
}

/// Resolve the query window
///
/// With both bounds: whole UTC days from `from` to `to`. Otherwise the
/// current week up to `now`.
pub fn time_window(
    range: Option<&DateRange>,
    now: DateTime<Utc>,
    week_start: Weekday,
) -> Result<TimeWindow, BuildError> {
    if let Some(DateRange { from: Some(from), to: Some(to), .. }) = range {
        if from > to {
            return Err(BuildError::InvalidDateRange { from: *from, to: *to });
        }
        return Ok(TimeWindow {
            from: start_of_day(*from),
            to: end_of_day(*to),
        });
    }

    let week_start_day = start_of_week(now.date_naive(), week_start);
    Ok(TimeWindow {
        from: start_of_day(week_start_day),
        to: now.timestamp(),
    })
}

/// Time-series granularity for `gbt`
///
/// An explicit range without a frequency uses `default`. The current-week
/// window is charted hourly while it is shorter than a day.
pub fn resolve_frequency(range: Option<&DateRange>, window: TimeWindow, default: Frequency) -> Frequency {
    if let Some(frequency) = range.and_then(|r| r.frequency) {
        return frequency;
    }
    let explicit = matches!(range, Some(DateRange { from: Some(_), to: Some(_), .. }));
    if !explicit && window.span() < SECONDS_IN_A_DAY {
        Frequency::Hour
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_explicit_range_covers_whole_days() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 7));
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let window = time_window(Some(&range), now, Weekday::Sun).unwrap();
        assert_eq!(window.from, 1704067200);
        assert_eq!(window.to, 1704671999);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let range = DateRange::new(date(2024, 1, 7), date(2024, 1, 1));
        let now = Utc::now();
        assert!(matches!(
            time_window(Some(&range), now, Weekday::Sun),
            Err(BuildError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_default_window_is_current_week() {
        // Wednesday
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 15, 30, 0).unwrap();
        let window = time_window(None, now, Weekday::Sun).unwrap();
        assert_eq!(window.from, start_of_day(date(2024, 1, 7)));
        assert_eq!(window.to, now.timestamp());
        assert_eq!(resolve_frequency(None, window, Frequency::Date), Frequency::Date);
    }

    #[test]
    fn test_first_day_of_week_is_hourly() {
        // Sunday
        let now = Utc.with_ymd_and_hms(2024, 1, 7, 9, 0, 0).unwrap();
        let window = time_window(None, now, Weekday::Sun).unwrap();
        assert_eq!(window.from, start_of_day(date(2024, 1, 7)));
        assert_eq!(resolve_frequency(None, window, Frequency::Date), Frequency::Hour);

        // Same day with Monday-start weeks is the last day of the week
        let window = time_window(None, now, Weekday::Mon).unwrap();
        assert_eq!(window.from, start_of_day(date(2024, 1, 1)));
    }

    #[test]
    fn test_single_day_range_uses_default_frequency() {
        let range = DateRange::new(date(2024, 1, 3), date(2024, 1, 3));
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let window = time_window(Some(&range), now, Weekday::Sun).unwrap();
        assert!(window.span() < SECONDS_IN_A_DAY);
        assert_eq!(resolve_frequency(Some(&range), window, Frequency::Date), Frequency::Date);
    }

    #[test]
    fn test_half_open_range_falls_back_to_current_week() {
        let range = DateRange {
            from: Some(date(2023, 5, 1)),
            to: None,
            frequency: Some(Frequency::Week),
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let window = time_window(Some(&range), now, Weekday::Sun).unwrap();
        assert_eq!(window.from, start_of_day(date(2024, 1, 7)));
        assert_eq!(resolve_frequency(Some(&range), window, Frequency::Date), Frequency::Week);
    }
}
