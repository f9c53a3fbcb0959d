//! Attendance-derived scores.
//!
//! All functions here are pure over the attendance rows handed in; fetching
//! the trailing window is the caller's job (see `storage::attendance`).

pub mod alerts;
pub mod gamification;
pub mod leaderboard;
pub mod performance;

pub use alerts::{smart_alerts, Alert};
pub use gamification::{calculate_gamification, Achievement, GamificationState, Level};
pub use leaderboard::{rank_leaderboard, LeaderboardCandidate, LeaderboardEntry};
pub use performance::{
    calculate_performance, EngagementSource, FixedEngagement, PerformanceState, RandomEngagement, Rating,
};

use chrono::{NaiveDateTime, Timelike};

use crate::config::scoring::ON_TIME_LAST_HOUR;
use crate::core::types::AttendanceRecord;

/// Whether a clock-in counts as on time for scoring.
///
/// Only the hour is compared, so anything up to 08:59 qualifies.
pub fn is_on_time(clock_in: NaiveDateTime) -> bool {
    clock_in.hour() <= ON_TIME_LAST_HOUR
}

/// Present days and on-time present days in a set of rows.
pub(crate) fn presence_counts(records: &[AttendanceRecord]) -> (u32, u32) {
    records
        .iter()
        .filter(|r| r.is_present())
        .fold((0, 0), |(present, on_time), r| {
            let punctual = r.clock_in.is_some_and(is_on_time);
            (present + 1, on_time + u32::from(punctual))
        })
}

/// Present days over a fixed window length, as a percentage.
///
/// Days without a row count as absent because the denominator is the window,
/// not the number of rows.
pub(crate) fn attendance_rate(present: u32, window_days: i64) -> f64 {
    if window_days <= 0 {
        return 0.0;
    }
    f64::from(present) / window_days as f64 * 100.0
}

/// On-time share of present days, as a percentage (0 when nobody showed up).
pub(crate) fn punctuality_rate(present: u32, on_time: u32) -> f64 {
    if present == 0 {
        return 0.0;
    }
    f64::from(on_time) / f64::from(present) * 100.0
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, NaiveDate};

    use crate::core::types::{AttendanceRecord, AttendanceStatus};

    pub fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(n - 1)
    }

    pub fn present(n: i64, hour: u32, minute: u32) -> AttendanceRecord {
        let date = day(n);
        let clock_in = date.and_hms_opt(hour, minute, 0).unwrap();
        AttendanceRecord {
            date,
            clock_in: Some(clock_in),
            clock_out: Some(date.and_hms_opt(17, 0, 0).unwrap()),
            status: AttendanceStatus::Present,
            worked_hours: 8.0,
        }
    }

    pub fn missing(n: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            date: day(n),
            clock_in: None,
            clock_out: None,
            status,
            worked_hours: 0.0,
        }
    }

    /// `days` consecutive present, on-time rows starting at day `from`.
    pub fn present_run(from: i64, days: i64) -> Vec<AttendanceRecord> {
        (from..from + days).map(|n| present(n, 7, 45)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::core::types::AttendanceStatus;

    #[test]
    fn on_time_ignores_minutes() {
        assert!(is_on_time(day(1).and_hms_opt(8, 59, 0).unwrap()));
        assert!(is_on_time(day(1).and_hms_opt(6, 0, 0).unwrap()));
        assert!(!is_on_time(day(1).and_hms_opt(9, 0, 0).unwrap()));
    }

    #[test]
    fn presence_counts_skips_non_present_rows() {
        let mut records = vec![present(1, 8, 30), present(2, 9, 10)];
        records.push(missing(3, AttendanceStatus::Sick));
        let mut leave_with_clock_in = present(4, 7, 0);
        leave_with_clock_in.status = AttendanceStatus::Leave;
        records.push(leave_with_clock_in);

        assert_eq!(presence_counts(&records), (2, 1));
    }

    #[test]
    fn zero_present_days_never_divide_by_zero() {
        assert_eq!(attendance_rate(0, 30), 0.0);
        assert_eq!(punctuality_rate(0, 0), 0.0);
        assert_eq!(attendance_rate(3, 0), 0.0);
    }
}
