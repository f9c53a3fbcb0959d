use chrono::NaiveDateTime;
use teloxide::types::InlineKeyboardMarkup;

use staffcore::config::menu::ATTENDANCE_PAGE_SIZE;
use staffcore::core::types::AttendanceRecord;
use staffcore::storage::attendance::{self, is_late, ClockInOutcome, ClockOutOutcome};
use staffcore::AppResult;

use super::{back_row, back_to_main, Screen, ScreenContext};
use crate::telegram::format::{day_label, time_or_dash, SEPARATOR};
use crate::telegram::{cb, MenuAction, MAX_HISTORY_PAGE};

fn attendance_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            cb("Clock In", MenuAction::ClockIn.as_data()),
            cb("Clock Out", MenuAction::ClockOut.as_data()),
        ],
        vec![cb("History", MenuAction::AttendanceHistory { page: 0 }.as_data())],
        back_to_main(),
    ])
}

fn back_to_attendance() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![back_row(MenuAction::Attendance, "<< Attendance")])
}

/// One status line; arrivals after the grace period carry a LATE mark.
fn record_line(record: &AttendanceRecord) -> String {
    let late = match record.clock_in {
        Some(at) if is_late(at) => " LATE",
        _ => "",
    };
    format!(
        "{} | {} | in {}{} | out {} | {:.2}h",
        day_label(record.date),
        record.status.as_ref().to_uppercase(),
        time_or_dash(record.clock_in),
        late,
        time_or_dash(record.clock_out),
        record.worked_hours
    )
}

pub fn render_attendance_menu(today: Option<&AttendanceRecord>, now: NaiveDateTime) -> Screen {
    let status = match today {
        Some(record) => record_line(record),
        None => "No attendance recorded yet today.".to_string(),
    };
    let text = format!(
        "<b>ATTENDANCE</b>\n{}\n{}\n{}\n\nWork starts at 08:00, late after 08:15.",
        day_label(now.date()),
        SEPARATOR,
        status
    );
    (text, attendance_keyboard())
}

pub fn render_clock_in(outcome: &ClockInOutcome) -> Screen {
    let text = match outcome {
        ClockInOutcome::Recorded { at, late: false } => {
            format!("<b>Clock in recorded</b>\nTime: {}\nStatus: ON TIME", at.format("%H:%M"))
        }
        ClockInOutcome::Recorded { at, late: true } => {
            format!("<b>Clock in recorded</b>\nTime: {}\nStatus: LATE", at.format("%H:%M"))
        }
        ClockInOutcome::AlreadyClockedIn { at } => {
            format!("You already clocked in today at {}.", at.format("%H:%M"))
        }
    };
    (text, back_to_attendance())
}

pub fn render_clock_out(outcome: &ClockOutOutcome) -> Screen {
    let text = match outcome {
        ClockOutOutcome::Recorded {
            clock_in,
            clock_out,
            worked_hours,
        } => format!(
            "<b>Clock out recorded</b>\nIn: {}\nOut: {}\nWorked: {:.2} hours",
            clock_in.format("%H:%M"),
            clock_out.format("%H:%M"),
            worked_hours
        ),
        ClockOutOutcome::NotClockedIn => "You have not clocked in today. Clock in first.".to_string(),
        ClockOutOutcome::AlreadyClockedOut { at } => {
            format!("You already clocked out today at {}.", at.format("%H:%M"))
        }
    };
    (text, back_to_attendance())
}

/// History page `page` (zero-based) with previous/next buttons where they apply.
pub fn render_history(records: &[AttendanceRecord], page: usize, has_more: bool) -> Screen {
    let body = if records.is_empty() {
        "No attendance records.".to_string()
    } else {
        records.iter().map(record_line).collect::<Vec<_>>().join("\n")
    };
    let text = format!("<b>ATTENDANCE HISTORY</b> (page {})\n{}\n{}", page.saturating_add(1), SEPARATOR, body);

    let mut nav = Vec::new();
    if page > 0 {
        nav.push(cb("< Newer", MenuAction::AttendanceHistory { page: page - 1 }.as_data()));
    }
    if has_more && page < MAX_HISTORY_PAGE {
        nav.push(cb("Older >", MenuAction::AttendanceHistory { page: page + 1 }.as_data()));
    }
    let mut rows = Vec::new();
    if !nav.is_empty() {
        rows.push(nav);
    }
    rows.push(back_row(MenuAction::Attendance, "<< Attendance"));

    (text, InlineKeyboardMarkup::new(rows))
}

pub(super) fn attendance_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let today = attendance::for_day(ctx.conn, ctx.employee.id, ctx.now.date())?;
    Ok(render_attendance_menu(today.as_ref(), ctx.now))
}

pub(super) fn clock_in_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let outcome = attendance::clock_in(ctx.conn, ctx.employee.id, ctx.now)?;
    Ok(render_clock_in(&outcome))
}

pub(super) fn clock_out_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let outcome = attendance::clock_out(ctx.conn, ctx.employee.id, ctx.now)?;
    Ok(render_clock_out(&outcome))
}

pub(super) fn history_screen(ctx: &ScreenContext<'_>, page: usize) -> AppResult<Screen> {
    let (records, has_more) = attendance::page(ctx.conn, ctx.employee.id, page, ATTENDANCE_PAGE_SIZE)?;
    Ok(render_history(&records, page, has_more))
}
