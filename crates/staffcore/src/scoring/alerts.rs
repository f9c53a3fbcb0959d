use serde::Serialize;

use super::gamification::GamificationState;
use crate::config::scoring::STREAK_BONUS_FROM;

/// Points gap under which a level-up is announced.
const LEVEL_UP_NOTICE_POINTS: u32 = 100;
/// Attendance rate from which attendance is praised.
const EXCELLENT_ATTENDANCE_RATE: f64 = 95.0;

/// Proactive notice derived from a gamification snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Alert {
    LevelUpSoon { points_needed: u32 },
    StreakMilestone { days: u32 },
    ExcellentAttendance { rate: f64 },
}

impl Alert {
    pub fn message(&self) -> String {
        match self {
            Alert::LevelUpSoon { points_needed } => {
                format!("Only {} points to the next level!", points_needed)
            }
            Alert::StreakMilestone { days } => format!("{}-day attendance streak, keep it up!", days),
            Alert::ExcellentAttendance { rate } => format!("Excellent attendance: {:.1}%", rate),
        }
    }
}

pub fn smart_alerts(state: &GamificationState) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if state.next_level.is_some() && state.points_needed < LEVEL_UP_NOTICE_POINTS {
        alerts.push(Alert::LevelUpSoon {
            points_needed: state.points_needed,
        });
    }
    if state.current_streak >= STREAK_BONUS_FROM {
        alerts.push(Alert::StreakMilestone {
            days: state.current_streak,
        });
    }
    if state.attendance_rate >= EXCELLENT_ATTENDANCE_RATE {
        alerts.push(Alert::ExcellentAttendance {
            rate: state.attendance_rate,
        });
    }

    alerts
}
