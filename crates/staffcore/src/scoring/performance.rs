//! Weighted performance score over the trailing 90 days.

use serde::Serialize;
use strum::{AsRefStr, Display};

use super::{attendance_rate, presence_counts, punctuality_rate};
use crate::config::scoring::{PERFORMANCE_WINDOW_DAYS, STANDARD_DAILY_HOURS};
use crate::core::types::AttendanceRecord;

const ATTENDANCE_WEIGHT: f64 = 0.4;
const PUNCTUALITY_WEIGHT: f64 = 0.2;
const HOURS_WEIGHT: f64 = 0.2;
const ENGAGEMENT_WEIGHT: f64 = 0.2;

/// Lower and upper bound of the sampled engagement term.
pub const ENGAGEMENT_RANGE: (f64, f64) = (75.0, 95.0);

/// Source of the engagement term.
///
/// There is no engagement metric yet, so production samples a value in
/// `ENGAGEMENT_RANGE`; tests pin it with `FixedEngagement`.
pub trait EngagementSource: Send + Sync {
    fn engagement(&self) -> f64;
}

/// Uniform sample from `ENGAGEMENT_RANGE` on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEngagement;

impl EngagementSource for RandomEngagement {
    fn engagement(&self) -> f64 {
        rand::random_range(ENGAGEMENT_RANGE.0..=ENGAGEMENT_RANGE.1)
    }
}

/// Constant engagement value.
#[derive(Debug, Clone, Copy)]
pub struct FixedEngagement(pub f64);

impl EngagementSource for FixedEngagement {
    fn engagement(&self) -> f64 {
        self.0
    }
}

/// Rating band for a total score. `NoData` marks an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, Serialize)]
pub enum Rating {
    #[strum(serialize = "NO DATA")]
    NoData,
    #[strum(serialize = "NEEDS IMPROVEMENT")]
    NeedsImprovement,
    #[strum(serialize = "SATISFACTORY")]
    Satisfactory,
    #[strum(serialize = "GOOD")]
    Good,
    #[strum(serialize = "EXCELLENT")]
    Excellent,
    #[strum(serialize = "OUTSTANDING")]
    Outstanding,
}

impl Rating {
    pub fn for_score(total: f64) -> Rating {
        match total {
            t if t >= 90.0 => Rating::Outstanding,
            t if t >= 80.0 => Rating::Excellent,
            t if t >= 70.0 => Rating::Good,
            t if t >= 60.0 => Rating::Satisfactory,
            _ => Rating::NeedsImprovement,
        }
    }

    /// Number of filled stars out of five.
    pub fn stars(self) -> usize {
        match self {
            Rating::Outstanding => 5,
            Rating::Excellent => 4,
            Rating::Good => 3,
            Rating::Satisfactory => 2,
            Rating::NeedsImprovement | Rating::NoData => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceState {
    /// Weighted total, 0-100.
    pub total: f64,
    pub rating: Rating,
    pub attendance_rate: f64,
    pub punctuality_rate: f64,
    pub avg_daily_hours: f64,
}

impl PerformanceState {
    /// Sentinel for an employee without any row in the window.
    pub fn no_data() -> Self {
        Self {
            total: 0.0,
            rating: Rating::NoData,
            attendance_rate: 0.0,
            punctuality_rate: 0.0,
            avg_daily_hours: 0.0,
        }
    }
}

/// Scores one employee's trailing `PERFORMANCE_WINDOW_DAYS` rows.
///
/// The engagement term is only sampled when there is data to score.
pub fn calculate_performance(records: &[AttendanceRecord], engagement: &dyn EngagementSource) -> PerformanceState {
    if records.is_empty() {
        return PerformanceState::no_data();
    }

    let (present, on_time) = presence_counts(records);
    let attendance_rate = attendance_rate(present, PERFORMANCE_WINDOW_DAYS);
    let punctuality_rate = punctuality_rate(present, on_time);

    let avg_daily_hours = if present > 0 {
        let hours: f64 = records.iter().filter(|r| r.is_present()).map(|r| r.worked_hours).sum();
        hours / f64::from(present)
    } else {
        0.0
    };
    let hours_score = (avg_daily_hours / STANDARD_DAILY_HOURS * 100.0).min(100.0);

    let total = ATTENDANCE_WEIGHT * attendance_rate
        + PUNCTUALITY_WEIGHT * punctuality_rate
        + HOURS_WEIGHT * hours_score
        + ENGAGEMENT_WEIGHT * engagement.engagement();

    PerformanceState {
        total,
        rating: Rating::for_score(total),
        attendance_rate,
        punctuality_rate,
        avg_daily_hours,
    }
}
