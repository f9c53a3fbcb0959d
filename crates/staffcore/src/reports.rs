//! Scores and summaries for one employee, read from storage and computed on demand.
//!
//! Nothing here is persisted; every call re-reads the trailing windows.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::assistant::EmployeeContext;
use crate::config::menu::LEADERBOARD_SIZE;
use crate::config::scoring::{GAMIFICATION_WINDOW_DAYS, PERFORMANCE_WINDOW_DAYS};
use crate::core::error::AppResult;
use crate::scoring::{
    calculate_gamification, calculate_performance, rank_leaderboard, EngagementSource, GamificationState,
    LeaderboardCandidate, LeaderboardEntry, PerformanceState,
};
use crate::storage::employees::{self, Employee};
use crate::storage::{attendance, payroll};

pub fn gamification_for(conn: &Connection, employee_id: i64, today: NaiveDate) -> AppResult<GamificationState> {
    let records = attendance::window(conn, employee_id, today, GAMIFICATION_WINDOW_DAYS)?;
    Ok(calculate_gamification(&records))
}

pub fn performance_for(
    conn: &Connection,
    employee_id: i64,
    today: NaiveDate,
    engagement: &dyn EngagementSource,
) -> AppResult<PerformanceState> {
    let records = attendance::window(conn, employee_id, today, PERFORMANCE_WINDOW_DAYS)?;
    Ok(calculate_performance(&records, engagement))
}

/// Ranks the first `LEADERBOARD_SIZE` employees by id.
///
/// The requester is flagged only if they are part of that page; this is not a
/// global rank.
pub fn leaderboard(conn: &Connection, requester_id: i64, today: NaiveDate) -> AppResult<Vec<LeaderboardEntry>> {
    let candidates = employees::list(conn, LEADERBOARD_SIZE)?
        .into_iter()
        .map(|emp| {
            Ok(LeaderboardCandidate {
                state: gamification_for(conn, emp.id, today)?,
                employee_id: emp.id,
                name: emp.name,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(rank_leaderboard(candidates, requester_id, LEADERBOARD_SIZE))
}

/// Facts about `employee` for the assistant prompt.
pub fn employee_context(conn: &Connection, employee: &Employee, today: NaiveDate) -> AppResult<EmployeeContext> {
    let slip = payroll::for_period(conn, employee.id, &payroll::period_of(today))?;
    Ok(EmployeeContext {
        name: employee.name.clone(),
        position: employee.position.clone(),
        department: employee.department.clone(),
        current_salary: slip.map(|s| s.total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AttendanceRecord, AttendanceStatus};
    use crate::scoring::{FixedEngagement, Level, Rating};
    use crate::storage::attendance::upsert_record;
    use crate::storage::payroll::{upsert_slip, PayrollSlip};
    use crate::storage::testing::{add_employee, make_conn};
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn attend(conn: &Connection, employee_id: i64, days_ago: i64) {
        let date = today() - Duration::days(days_ago);
        upsert_record(
            conn,
            employee_id,
            &AttendanceRecord {
                date,
                clock_in: date.and_hms_opt(7, 55, 0),
                clock_out: date.and_hms_opt(16, 55, 0),
                status: AttendanceStatus::Present,
                worked_hours: 9.0,
            },
        )
        .unwrap();
    }

    #[test]
    fn gamification_reads_only_the_trailing_window() {
        let conn = make_conn();
        let emp = add_employee(&conn, "1", "Ani");
        for days_ago in 0..7 {
            attend(&conn, emp, days_ago);
        }
        // outside the 30-day window
        attend(&conn, emp, 45);

        let state = gamification_for(&conn, emp, today()).unwrap();
        assert_eq!(state.max_streak, 7);
        assert_eq!(state.points, 427);
        assert_eq!(state.level, Level::Bronze);
    }

    #[test]
    fn performance_without_rows_is_no_data() {
        let conn = make_conn();
        let emp = add_employee(&conn, "1", "Ani");
        let state = performance_for(&conn, emp, today(), &FixedEngagement(80.0)).unwrap();
        assert_eq!(state.rating, Rating::NoData);
        assert_eq!(state.total, 0.0);
    }

    #[test]
    fn leaderboard_flags_requester() {
        let conn = make_conn();
        let ani = add_employee(&conn, "1", "Ani");
        let budi = add_employee(&conn, "2", "Budi");
        for days_ago in 0..10 {
            attend(&conn, budi, days_ago);
        }
        attend(&conn, ani, 0);

        let board = leaderboard(&conn, ani, today()).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].name, "Budi");
        assert!(board[1].is_me);
        assert!(!board[0].is_me);
    }

    #[test]
    fn context_includes_current_slip_total() {
        let conn = make_conn();
        let id = add_employee(&conn, "1", "Ani");
        upsert_slip(
            &conn,
            id,
            &PayrollSlip {
                period: "2025-06".to_string(),
                base_salary: 8_000_000.0,
                allowance: 500_000.0,
                bonus: 0.0,
                deduction: 0.0,
                total: 8_500_000.0,
                status: "paid".to_string(),
                paid_at: None,
            },
        )
        .unwrap();
        let employee = employees::get(&conn, id).unwrap().unwrap();

        let ctx = employee_context(&conn, &employee, today()).unwrap();
        assert_eq!(ctx.current_salary, Some(8_500_000.0));
        assert_eq!(ctx.department.as_deref(), Some("Finance"));
    }
}
