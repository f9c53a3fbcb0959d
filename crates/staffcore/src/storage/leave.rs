use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::core::error::{AppError, AppResult};

/// Annual and sick allowance when an employee has no balance row for the year.
pub const DEFAULT_DAYS_PER_YEAR: i64 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct LeaveRequest {
    pub id: i64,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
    pub reason: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveBalance {
    pub year: i32,
    pub annual_total: i64,
    pub annual_used: i64,
    pub sick_total: i64,
    pub sick_used: i64,
}

impl LeaveBalance {
    pub fn default_for(year: i32) -> Self {
        Self {
            year,
            annual_total: DEFAULT_DAYS_PER_YEAR,
            annual_used: 0,
            sick_total: DEFAULT_DAYS_PER_YEAR,
            sick_used: 0,
        }
    }

    pub fn annual_remaining(&self) -> i64 {
        (self.annual_total - self.annual_used).max(0)
    }

    pub fn sick_remaining(&self) -> i64 {
        (self.sick_total - self.sick_used).max(0)
    }
}

fn parse_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<LeaveRequest> {
    Ok(LeaveRequest {
        id: row.get(0)?,
        leave_type: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        days: row.get(4)?,
        reason: row.get(5)?,
        status: row.get(6)?,
    })
}

/// Most recent `limit` requests, newest first.
pub fn recent_requests(conn: &Connection, employee_id: i64, limit: usize) -> AppResult<Vec<LeaveRequest>> {
    let mut stmt = conn.prepare(
        "SELECT id, leave_type, start_date, end_date, days, reason, status
         FROM leave_requests
         WHERE employee_id = ?1
         ORDER BY created_at DESC, id DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![employee_id, limit as i64], parse_request)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Files a pending request spanning `start..=end`. Returns the new id.
pub fn insert_request(
    conn: &Connection,
    employee_id: i64,
    leave_type: &str,
    start: NaiveDate,
    end: NaiveDate,
    reason: Option<&str>,
) -> AppResult<i64> {
    if end < start {
        return Err(AppError::Validation(format!(
            "leave ends ({}) before it starts ({})",
            end, start
        )));
    }
    let days = (end - start).num_days() + 1;
    conn.execute(
        "INSERT INTO leave_requests (employee_id, leave_type, start_date, end_date, days, reason)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![employee_id, leave_type, start, end, days, reason],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Balance for `year`, or the 12/12 default when none is stored.
pub fn balance(conn: &Connection, employee_id: i64, year: i32) -> AppResult<LeaveBalance> {
    let stored = conn
        .query_row(
            "SELECT annual_total, annual_used, sick_total, sick_used
             FROM leave_balances WHERE employee_id = ?1 AND year = ?2",
            params![employee_id, year],
            |row| {
                Ok(LeaveBalance {
                    year,
                    annual_total: row.get(0)?,
                    annual_used: row.get(1)?,
                    sick_total: row.get(2)?,
                    sick_used: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(stored.unwrap_or_else(|| LeaveBalance::default_for(year)))
}

pub fn set_balance(conn: &Connection, employee_id: i64, balance: &LeaveBalance) -> AppResult<()> {
    conn.execute(
        "INSERT INTO leave_balances (employee_id, year, annual_total, annual_used, sick_total, sick_used)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(employee_id, year) DO UPDATE SET
           annual_total = excluded.annual_total,
           annual_used = excluded.annual_used,
           sick_total = excluded.sick_total,
           sick_used = excluded.sick_used,
           updated_at = CURRENT_TIMESTAMP",
        params![
            employee_id,
            balance.year,
            balance.annual_total,
            balance.annual_used,
            balance.sick_total,
            balance.sick_used
        ],
    )?;
    Ok(())
}
