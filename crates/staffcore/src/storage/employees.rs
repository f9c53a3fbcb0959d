//! Employee identity rows and the one-time Telegram identity claim.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::core::error::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub telegram_user_id: Option<i64>,
    /// Employee number (NIK)
    pub nik: String,
    pub name: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub base_salary: f64,
    pub status: String,
}

/// Time since joining as whole (years, months).
///
/// A year is 365 days and a month 30 days of the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenure {
    pub years: i64,
    pub months: i64,
}

impl Employee {
    pub fn tenure(&self, today: NaiveDate) -> Option<Tenure> {
        let days = (today - self.join_date?).num_days().max(0);
        Some(Tenure {
            years: days / 365,
            months: (days % 365) / 30,
        })
    }
}

/// Fields for a new, unlinked employee.
#[derive(Debug, Clone)]
pub struct NewEmployee<'a> {
    pub nik: &'a str,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub position: Option<&'a str>,
    pub department: Option<&'a str>,
    pub join_date: Option<NaiveDate>,
    pub base_salary: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    /// This Telegram user was linked before.
    AlreadyLinked(Employee),
    /// This call linked the user to a free employee record.
    Linked(Employee),
    /// Every employee record is already claimed.
    NoneAvailable,
}

const COLUMNS: &str =
    "id, telegram_user_id, nik, name, email, position, department, join_date, base_salary, status";

fn parse_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        telegram_user_id: row.get(1)?,
        nik: row.get(2)?,
        name: row.get(3)?,
        email: row.get(4)?,
        position: row.get(5)?,
        department: row.get(6)?,
        join_date: row.get(7)?,
        base_salary: row.get(8)?,
        status: row.get(9)?,
    })
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Option<Employee>> {
    let sql = format!("SELECT {} FROM employees WHERE id = ?1", COLUMNS);
    Ok(conn.query_row(&sql, params![id], parse_row).optional()?)
}

pub fn get_by_telegram_id(conn: &Connection, telegram_user_id: i64) -> AppResult<Option<Employee>> {
    let sql = format!("SELECT {} FROM employees WHERE telegram_user_id = ?1", COLUMNS);
    Ok(conn.query_row(&sql, params![telegram_user_id], parse_row).optional()?)
}

/// First `limit` employees by id.
pub fn list(conn: &Connection, limit: usize) -> AppResult<Vec<Employee>> {
    let sql = format!("SELECT {} FROM employees ORDER BY id LIMIT ?1", COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![limit as i64], parse_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn insert(conn: &Connection, employee: &NewEmployee<'_>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (nik, name, email, position, department, join_date, base_salary)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            employee.nik,
            employee.name,
            employee.email,
            employee.position,
            employee.department,
            employee.join_date,
            employee.base_salary
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Links `telegram_user_id` to the lowest-id employee that has no identity yet.
///
/// The update is a single statement guarded by `telegram_user_id IS NULL`,
/// so a record is never claimed twice.
pub fn claim_identity(conn: &Connection, telegram_user_id: i64) -> AppResult<ClaimOutcome> {
    if let Some(existing) = get_by_telegram_id(conn, telegram_user_id)? {
        return Ok(ClaimOutcome::AlreadyLinked(existing));
    }

    let changed = conn.execute(
        "UPDATE employees SET telegram_user_id = ?1
         WHERE id = (SELECT id FROM employees WHERE telegram_user_id IS NULL ORDER BY id LIMIT 1)
           AND telegram_user_id IS NULL",
        params![telegram_user_id],
    )?;
    if changed == 0 {
        log::warn!("No free employee record for telegram user {}", telegram_user_id);
        return Ok(ClaimOutcome::NoneAvailable);
    }

    match get_by_telegram_id(conn, telegram_user_id)? {
        Some(employee) => {
            log::info!("Telegram user {} linked to employee {}", telegram_user_id, employee.id);
            Ok(ClaimOutcome::Linked(employee))
        }
        None => Ok(ClaimOutcome::NoneAvailable),
    }
}
