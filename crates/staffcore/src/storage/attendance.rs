//! Attendance rows: scoring windows, history pages and clock in/out.

use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::config::menu::LATE_GRACE_MINUTES;
use crate::core::error::{AppError, AppResult};
use crate::core::types::{AttendanceRecord, AttendanceStatus};

const COLUMNS: &str = "date, clock_in, clock_out, status, worked_hours";

fn parse_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AttendanceRecord> {
    let status: String = row.get(3)?;
    let status = AttendanceStatus::from_str(&status)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    Ok(AttendanceRecord {
        date: row.get(0)?,
        clock_in: row.get(1)?,
        clock_out: row.get(2)?,
        status,
        worked_hours: row.get(4)?,
    })
}

/// Rows dated on or after `since`, oldest first.
pub fn records_since(conn: &Connection, employee_id: i64, since: NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
    let sql = format!(
        "SELECT {} FROM attendance WHERE employee_id = ?1 AND date >= ?2 ORDER BY date ASC",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![employee_id, since], parse_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Trailing window of `days` calendar days ending with `today`.
pub fn window(conn: &Connection, employee_id: i64, today: NaiveDate, days: i64) -> AppResult<Vec<AttendanceRecord>> {
    records_since(conn, employee_id, today - Duration::days(days - 1))
}

pub fn for_day(conn: &Connection, employee_id: i64, date: NaiveDate) -> AppResult<Option<AttendanceRecord>> {
    let sql = format!("SELECT {} FROM attendance WHERE employee_id = ?1 AND date = ?2", COLUMNS);
    Ok(conn.query_row(&sql, params![employee_id, date], parse_row).optional()?)
}

/// One page of history, newest first, and whether an older page exists.
///
/// A page whose offset does not fit SQLite's signed 64-bit range is a
/// validation error.
pub fn page(
    conn: &Connection,
    employee_id: i64,
    page: usize,
    page_size: usize,
) -> AppResult<(Vec<AttendanceRecord>, bool)> {
    let out_of_range = || AppError::Validation(format!("history page {} out of range", page));
    let limit = page_size
        .checked_add(1)
        .and_then(|n| i64::try_from(n).ok())
        .ok_or_else(out_of_range)?;
    let offset = page
        .checked_mul(page_size)
        .and_then(|n| i64::try_from(n).ok())
        .ok_or_else(out_of_range)?;

    let sql = format!(
        "SELECT {} FROM attendance WHERE employee_id = ?1 ORDER BY date DESC LIMIT ?2 OFFSET ?3",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![employee_id, limit, offset], parse_row)?;
    let mut records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    let has_more = records.len() > page_size;
    records.truncate(page_size);
    Ok((records, has_more))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClockInOutcome {
    Recorded { at: NaiveDateTime, late: bool },
    AlreadyClockedIn { at: NaiveDateTime },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClockOutOutcome {
    Recorded {
        clock_in: NaiveDateTime,
        clock_out: NaiveDateTime,
        worked_hours: f64,
    },
    NotClockedIn,
    AlreadyClockedOut { at: NaiveDateTime },
}

/// Arrival after 08:00 plus the grace period. Display only, scoring uses
/// `scoring::is_on_time`.
pub fn is_late(at: NaiveDateTime) -> bool {
    let cutoff = NaiveTime::from_hms_opt(8, LATE_GRACE_MINUTES, 0).unwrap_or(NaiveTime::MIN);
    at.time() > cutoff
}

/// Records today's arrival, creating the row or filling one without a clock-in.
pub fn clock_in(conn: &Connection, employee_id: i64, now: NaiveDateTime) -> AppResult<ClockInOutcome> {
    let today = now.date();
    if let Some(at) = for_day(conn, employee_id, today)?.and_then(|r| r.clock_in) {
        return Ok(ClockInOutcome::AlreadyClockedIn { at });
    }

    let changed = conn.execute(
        "INSERT INTO attendance (employee_id, date, clock_in, status)
         VALUES (?1, ?2, ?3, 'present')
         ON CONFLICT(employee_id, date) DO UPDATE SET
           clock_in = excluded.clock_in,
           status = 'present'
         WHERE attendance.clock_in IS NULL",
        params![employee_id, today, now],
    )?;
    if changed == 0 {
        // another request stored an arrival after our read
        return match for_day(conn, employee_id, today)?.and_then(|r| r.clock_in) {
            Some(at) => Ok(ClockInOutcome::AlreadyClockedIn { at }),
            None => Err(AppError::Validation(format!(
                "arrival for employee {} on {} was not stored",
                employee_id, today
            ))),
        };
    }

    log::info!("Employee {} clocked in at {}", employee_id, now);
    Ok(ClockInOutcome::Recorded {
        at: now,
        late: is_late(now),
    })
}

/// Records today's departure and the worked hours, rounded to 2 decimals.
pub fn clock_out(conn: &Connection, employee_id: i64, now: NaiveDateTime) -> AppResult<ClockOutOutcome> {
    let Some(record) = for_day(conn, employee_id, now.date())? else {
        return Ok(ClockOutOutcome::NotClockedIn);
    };
    let Some(clock_in) = record.clock_in else {
        return Ok(ClockOutOutcome::NotClockedIn);
    };
    if let Some(at) = record.clock_out {
        return Ok(ClockOutOutcome::AlreadyClockedOut { at });
    }

    let seconds = (now - clock_in).num_seconds().max(0);
    let worked_hours = (seconds as f64 / 3600.0 * 100.0).round() / 100.0;

    let changed = conn.execute(
        "UPDATE attendance SET clock_out = ?3, worked_hours = ?4
         WHERE employee_id = ?1 AND date = ?2 AND clock_out IS NULL",
        params![employee_id, now.date(), now, worked_hours],
    )?;
    if changed == 0 {
        return Ok(match for_day(conn, employee_id, now.date())?.and_then(|r| r.clock_out) {
            Some(at) => ClockOutOutcome::AlreadyClockedOut { at },
            None => ClockOutOutcome::NotClockedIn,
        });
    }

    log::info!("Employee {} clocked out at {} ({:.2}h)", employee_id, now, worked_hours);
    Ok(ClockOutOutcome::Recorded {
        clock_in,
        clock_out: now,
        worked_hours,
    })
}

/// Writes a full row, replacing any row for the same day. Used for imports and tests.
pub fn upsert_record(conn: &Connection, employee_id: i64, record: &AttendanceRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO attendance (employee_id, date, clock_in, clock_out, status, worked_hours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(employee_id, date) DO UPDATE SET
           clock_in = excluded.clock_in,
           clock_out = excluded.clock_out,
           status = excluded.status,
           worked_hours = excluded.worked_hours",
        params![
            employee_id,
            record.date,
            record.clock_in,
            record.clock_out,
            record.status.as_ref(),
            record.worked_hours
        ],
    )?;
    Ok(())
}
