//! The closed set of menu actions carried in inline-button callback data.

use std::fmt;

use staffcore::config::menu::ATTENDANCE_PAGE_SIZE;
use strum::{AsRefStr, EnumString};

/// Everything a menu button can ask for.
///
/// Callback data is the snake_case action name; history pages append
/// `:<page>` (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MenuAction {
    MainMenu,
    About,
    Gamification,
    Leaderboard,
    Alerts,
    Analytics,
    Profile,
    AiMode,
    Payroll,
    PayrollCurrent,
    PayrollHistory,
    Attendance,
    ClockIn,
    ClockOut,
    /// Bare `attendance_history` opens page 0.
    AttendanceHistory { page: usize },
    Leave,
    LeaveStatus,
    LeaveBalance,
    Performance,
    PerfScore,
}

const HISTORY_PAGE_PREFIX: &str = "attendance_history:";

/// Highest history page whose row offset still fits a SQLite integer.
pub const MAX_HISTORY_PAGE: usize = (i64::MAX as u64 / ATTENDANCE_PAGE_SIZE as u64) as usize;

impl MenuAction {
    /// Decodes callback data. Unknown or malformed data, and pages past
    /// [`MAX_HISTORY_PAGE`], yield `None`.
    pub fn parse(data: &str) -> Option<Self> {
        match data.strip_prefix(HISTORY_PAGE_PREFIX) {
            Some(page) => page
                .parse::<usize>()
                .ok()
                .filter(|page| *page <= MAX_HISTORY_PAGE)
                .map(|page| MenuAction::AttendanceHistory { page }),
            None => data.parse().ok(),
        }
    }

    /// Callback data for this action.
    pub fn as_data(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::AttendanceHistory { page } => write!(f, "{}{}", HISTORY_PAGE_PREFIX, page),
            other => f.write_str(other.as_ref()),
        }
    }
}
