use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

use crate::core::error::{AppError, AppResult};

/// One monthly pay slip.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollSlip {
    /// `YYYY-MM`
    pub period: String,
    pub base_salary: f64,
    pub allowance: f64,
    pub bonus: f64,
    pub deduction: f64,
    pub total: f64,
    pub status: String,
    pub paid_at: Option<NaiveDateTime>,
}

const COLUMNS: &str = "period, base_salary, allowance, bonus, deduction, total, status, paid_at";

fn parse_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PayrollSlip> {
    Ok(PayrollSlip {
        period: row.get(0)?,
        base_salary: row.get(1)?,
        allowance: row.get(2)?,
        bonus: row.get(3)?,
        deduction: row.get(4)?,
        total: row.get(5)?,
        status: row.get(6)?,
        paid_at: row.get(7)?,
    })
}

/// Period key of the month containing `day`.
pub fn period_of(day: NaiveDate) -> String {
    day.format("%Y-%m").to_string()
}

/// Checks a `YYYY-MM` period key.
pub fn validate_period(period: &str) -> AppResult<()> {
    let valid = period.len() == 7 && NaiveDate::parse_from_str(&format!("{}-01", period), "%Y-%m-%d").is_ok();
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!("period must be YYYY-MM, got {:?}", period)))
    }
}

pub fn for_period(conn: &Connection, employee_id: i64, period: &str) -> AppResult<Option<PayrollSlip>> {
    let sql = format!("SELECT {} FROM payroll WHERE employee_id = ?1 AND period = ?2", COLUMNS);
    Ok(conn.query_row(&sql, params![employee_id, period], parse_row).optional()?)
}

/// Most recent `limit` slips, newest period first.
pub fn history(conn: &Connection, employee_id: i64, limit: usize) -> AppResult<Vec<PayrollSlip>> {
    let sql = format!(
        "SELECT {} FROM payroll WHERE employee_id = ?1 ORDER BY period DESC LIMIT ?2",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![employee_id, limit as i64], parse_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Inserts or replaces the slip for `slip.period`.
pub fn upsert_slip(conn: &Connection, employee_id: i64, slip: &PayrollSlip) -> AppResult<()> {
    validate_period(&slip.period)?;
    conn.execute(
        "INSERT INTO payroll (employee_id, period, base_salary, allowance, bonus, deduction, total, status, paid_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(employee_id, period) DO UPDATE SET
           base_salary = excluded.base_salary,
           allowance = excluded.allowance,
           bonus = excluded.bonus,
           deduction = excluded.deduction,
           total = excluded.total,
           status = excluded.status,
           paid_at = excluded.paid_at",
        params![
            employee_id,
            slip.period,
            slip.base_salary,
            slip.allowance,
            slip.bonus,
            slip.deduction,
            slip.total,
            slip.status,
            slip.paid_at
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::{add_employee, make_conn};
    use pretty_assertions::assert_eq;

    fn slip(period: &str, total: f64) -> PayrollSlip {
        PayrollSlip {
            period: period.to_string(),
            base_salary: 8_000_000.0,
            allowance: 1_000_000.0,
            bonus: 0.0,
            deduction: 200_000.0,
            total,
            status: "paid".to_string(),
            paid_at: None,
        }
    }

    #[test]
    fn current_period_lookup() {
        let conn = make_conn();
        let emp = add_employee(&conn, "1", "Ani");
        upsert_slip(&conn, emp, &slip("2025-05", 8_800_000.0)).unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let found = for_period(&conn, emp, &period_of(day)).unwrap().unwrap();
        assert_eq!(found.total, 8_800_000.0);
        assert!(for_period(&conn, emp, "2025-06").unwrap().is_none());
    }

    #[test]
    fn history_is_newest_first_and_limited() {
        let conn = make_conn();
        let emp = add_employee(&conn, "1", "Ani");
        for month in 1..=12 {
            upsert_slip(&conn, emp, &slip(&format!("2024-{:02}", month), 1.0)).unwrap();
        }
        upsert_slip(&conn, emp, &slip("2025-01", 2.0)).unwrap();

        let periods: Vec<_> = history(&conn, emp, 3).unwrap().into_iter().map(|s| s.period).collect();
        assert_eq!(periods, vec!["2025-01", "2024-12", "2024-11"]);
    }

    #[test]
    fn upsert_replaces_the_period() {
        let conn = make_conn();
        let emp = add_employee(&conn, "1", "Ani");
        upsert_slip(&conn, emp, &slip("2025-02", 1.0)).unwrap();
        upsert_slip(&conn, emp, &slip("2025-02", 3.0)).unwrap();
        assert_eq!(history(&conn, emp, 12).unwrap().len(), 1);
        assert_eq!(for_period(&conn, emp, "2025-02").unwrap().unwrap().total, 3.0);
    }

    #[test]
    fn malformed_period_is_rejected() {
        assert!(validate_period("2025-13").is_err());
        assert!(validate_period("2025-1").is_err());
        assert!(validate_period("May 2025").is_err());
        assert!(validate_period("2025-12").is_ok());
    }
}
