//! Points, levels, streaks and achievements over the trailing 30 days.

use std::collections::BTreeSet;

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use super::{attendance_rate, presence_counts, punctuality_rate};
use crate::config::scoring::{GAMIFICATION_WINDOW_DAYS, STREAK_BONUS_FROM, STREAK_BONUS_POINTS};
use crate::core::types::AttendanceRecord;

/// Gamification tier. Variants are declared lowest first so `Ord` follows rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Level {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Level {
    /// Points needed to enter this level.
    pub const fn threshold(self) -> u32 {
        match self {
            Level::Bronze => 0,
            Level::Silver => 500,
            Level::Gold => 750,
            Level::Platinum => 900,
            Level::Diamond => 1000,
        }
    }

    /// The level above this one, `None` at the top.
    pub const fn next(self) -> Option<Level> {
        match self {
            Level::Bronze => Some(Level::Silver),
            Level::Silver => Some(Level::Gold),
            Level::Gold => Some(Level::Platinum),
            Level::Platinum => Some(Level::Diamond),
            Level::Diamond => None,
        }
    }

    /// Highest level whose threshold `points` reaches.
    pub fn for_points(points: u32) -> Level {
        Level::iter()
            .rev()
            .find(|level| points >= level.threshold())
            .unwrap_or(Level::Bronze)
    }

    /// One-letter badge used in compact listings.
    pub fn badge(self) -> char {
        match self {
            Level::Bronze => 'B',
            Level::Silver => 'S',
            Level::Gold => 'G',
            Level::Platinum => 'P',
            Level::Diamond => 'D',
        }
    }
}

/// Badges earned independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter, Serialize)]
pub enum Achievement {
    #[strum(serialize = "PERFECT ATTENDANCE")]
    PerfectAttendance,
    #[strum(serialize = "ALWAYS ON TIME")]
    AlwaysOnTime,
    #[strum(serialize = "MONTHLY CHAMPION")]
    MonthlyChampion,
    #[strum(serialize = "2-WEEK WARRIOR")]
    TwoWeekWarrior,
    #[strum(serialize = "WEEKLY STAR")]
    WeeklyStar,
}

impl Achievement {
    fn earned(self, attendance_rate: f64, punctuality_rate: f64, max_streak: u32) -> bool {
        match self {
            Achievement::PerfectAttendance => attendance_rate >= 98.0,
            Achievement::AlwaysOnTime => punctuality_rate >= 95.0,
            Achievement::MonthlyChampion => max_streak >= 30,
            Achievement::TwoWeekWarrior => max_streak >= 14,
            Achievement::WeeklyStar => max_streak >= 7,
        }
    }
}

/// Derived gamification snapshot, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GamificationState {
    pub points: u32,
    pub base_points: u32,
    pub streak_bonus: u32,
    pub level: Level,
    pub next_level: Option<Level>,
    /// Points missing to the next level, 0 at the top level.
    pub points_needed: u32,
    pub achievements: BTreeSet<Achievement>,
    /// Streak still running at the last row of the window.
    pub current_streak: u32,
    pub max_streak: u32,
    pub attendance_rate: f64,
    pub punctuality_rate: f64,
}

impl GamificationState {
    /// Share of the way from zero to the next level threshold, 100 at the top.
    pub fn level_progress(&self) -> f64 {
        if self.points_needed == 0 {
            return 100.0;
        }
        f64::from(self.points) / f64::from(self.points + self.points_needed) * 100.0
    }
}

#[derive(Debug, Default, PartialEq)]
struct StreakSummary {
    current: u32,
    max: u32,
    bonus: u32,
}

/// Walks rows oldest first. Each present day extends the run, anything else
/// resets it. Every present day at position 7 or later in a run earns a bonus.
fn scan_streaks(records: &[AttendanceRecord]) -> StreakSummary {
    let mut ordered: Vec<&AttendanceRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.date);

    ordered.into_iter().fold(StreakSummary::default(), |mut acc, record| {
        if record.is_present() {
            acc.current += 1;
            acc.max = acc.max.max(acc.current);
            if acc.current >= STREAK_BONUS_FROM {
                acc.bonus += STREAK_BONUS_POINTS;
            }
        } else {
            acc.current = 0;
        }
        acc
    })
}

/// Computes points, level and achievements for one employee.
///
/// `records` are the employee's rows inside the trailing
/// `GAMIFICATION_WINDOW_DAYS` window, in any order.
pub fn calculate_gamification(records: &[AttendanceRecord]) -> GamificationState {
    let (present, on_time) = presence_counts(records);
    let attendance_rate = attendance_rate(present, GAMIFICATION_WINDOW_DAYS);
    let punctuality_rate = punctuality_rate(present, on_time);

    let base_points = (attendance_rate * 5.0 + punctuality_rate * 3.0).round() as u32;
    let streaks = scan_streaks(records);
    let points = base_points + streaks.bonus;

    let level = Level::for_points(points);
    let next_level = level.next();
    let points_needed = next_level.map_or(0, |next| next.threshold().saturating_sub(points));

    let achievements = Achievement::iter()
        .filter(|a| a.earned(attendance_rate, punctuality_rate, streaks.max))
        .collect();

    GamificationState {
        points,
        base_points,
        streak_bonus: streaks.bonus,
        level,
        next_level,
        points_needed,
        achievements,
        current_streak: streaks.current,
        max_streak: streaks.max,
        attendance_rate,
        punctuality_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AttendanceStatus;
    use crate::scoring::fixtures::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_window_is_bronze_with_nothing_earned() {
        let state = calculate_gamification(&[]);
        assert_eq!(state.points, 0);
        assert_eq!(state.attendance_rate, 0.0);
        assert_eq!(state.punctuality_rate, 0.0);
        assert_eq!(state.level, Level::Bronze);
        assert_eq!(state.next_level, Some(Level::Silver));
        assert_eq!(state.points_needed, 500);
        assert!(state.achievements.is_empty());
    }

    #[test]
    fn seven_on_time_days_then_absent() {
        let mut records = present_run(1, 7);
        records.extend((8..=30).map(|n| missing(n, AttendanceStatus::Absent)));

        let state = calculate_gamification(&records);

        assert!((state.attendance_rate - 23.333).abs() < 0.01);
        assert_eq!(state.punctuality_rate, 100.0);
        assert_eq!(state.max_streak, 7);
        assert_eq!(state.current_streak, 0);
        assert_eq!(state.streak_bonus, 10);
        // round(23.33 * 5 + 100 * 3) = round(416.67)
        assert_eq!(state.base_points, 417);
        assert_eq!(state.points, 427);
        assert_eq!(state.level, Level::Bronze);
        assert_eq!(state.points_needed, 73);

        assert!(state.achievements.contains(&Achievement::WeeklyStar));
        assert!(!state.achievements.contains(&Achievement::TwoWeekWarrior));
        assert!(!state.achievements.contains(&Achievement::MonthlyChampion));
        assert!(!state.achievements.contains(&Achievement::PerfectAttendance));
        // 7 of 7 on time clears the punctuality bar as well
        assert!(state.achievements.contains(&Achievement::AlwaysOnTime));
    }

    #[test]
    fn long_run_earns_bonus_for_every_day_from_the_seventh() {
        let state = calculate_gamification(&present_run(1, 14));
        assert_eq!(state.max_streak, 14);
        assert_eq!(state.current_streak, 14);
        assert_eq!(state.streak_bonus, 80);
        assert!(state.achievements.contains(&Achievement::TwoWeekWarrior));
    }

    #[test]
    fn a_break_restarts_the_bonus_count() {
        let mut records = present_run(1, 8);
        records.push(missing(9, AttendanceStatus::Sick));
        records.extend(present_run(10, 8));

        let state = calculate_gamification(&records);
        assert_eq!(state.max_streak, 8);
        assert_eq!(state.current_streak, 8);
        assert_eq!(state.streak_bonus, 40);
    }

    #[test]
    fn rows_are_scanned_in_date_order() {
        let mut records = present_run(1, 7);
        records.reverse();
        records.insert(3, missing(8, AttendanceStatus::Absent));

        let state = calculate_gamification(&records);
        assert_eq!(state.max_streak, 7);
        assert_eq!(state.current_streak, 0);
    }

    #[test]
    fn perfect_month_holds_every_achievement() {
        let state = calculate_gamification(&present_run(1, 30));
        assert_eq!(state.attendance_rate, 100.0);
        assert_eq!(state.achievements.len(), 5);
        // 500 + 300 + 24 * 10
        assert_eq!(state.points, 1040);
        assert_eq!(state.level, Level::Diamond);
        assert_eq!(state.next_level, None);
        assert_eq!(state.points_needed, 0);
        assert_eq!(state.level_progress(), 100.0);
    }

    #[test]
    fn late_arrivals_lower_punctuality_only() {
        let records: Vec<_> = (1..=10).map(|n| present(n, if n <= 5 { 8 } else { 9 }, 30)).collect();
        let state = calculate_gamification(&records);
        assert_eq!(state.punctuality_rate, 50.0);
        assert!(!state.achievements.contains(&Achievement::AlwaysOnTime));
    }

    #[test]
    fn total_points_never_below_base() {
        for days in 0..=30 {
            let state = calculate_gamification(&present_run(1, days));
            assert!(state.points >= state.base_points);
        }
    }

    #[test]
    fn level_lookup_is_monotonic() {
        let mut previous = Level::Bronze;
        for points in 0..=1200 {
            let level = Level::for_points(points);
            assert!(level >= previous, "level dropped at {} points", points);
            previous = level;
        }
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(Level::for_points(499), Level::Bronze);
        assert_eq!(Level::for_points(500), Level::Silver);
        assert_eq!(Level::for_points(749), Level::Silver);
        assert_eq!(Level::for_points(750), Level::Gold);
        assert_eq!(Level::for_points(900), Level::Platinum);
        assert_eq!(Level::for_points(1000), Level::Diamond);
        assert_eq!(Level::Gold.to_string(), "GOLD");
        assert_eq!(Achievement::TwoWeekWarrior.to_string(), "2-WEEK WARRIOR");
    }
}
