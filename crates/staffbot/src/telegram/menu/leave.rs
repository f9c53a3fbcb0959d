use chrono::Datelike;
use teloxide::types::InlineKeyboardMarkup;

use staffcore::config::menu::LEAVE_STATUS_LIMIT;
use staffcore::core::escape_html;
use staffcore::storage::leave::{self, LeaveBalance, LeaveRequest};
use staffcore::AppResult;

use super::{back_row, back_to_main, Screen, ScreenContext};
use crate::telegram::format::SEPARATOR;
use crate::telegram::{cb, MenuAction};

fn back_to_leave() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![back_row(MenuAction::Leave, "<< Leave")])
}

pub fn render_leave_menu() -> Screen {
    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![
            cb("Request Status", MenuAction::LeaveStatus.as_data()),
            cb("Balance", MenuAction::LeaveBalance.as_data()),
        ],
        back_to_main(),
    ]);
    (
        "<b>LEAVE</b>\nLeave requests are filed with HR; here you can follow them.".to_string(),
        keyboard,
    )
}

pub fn render_status(requests: &[LeaveRequest]) -> Screen {
    let body = if requests.is_empty() {
        "No leave requests.".to_string()
    } else {
        requests
            .iter()
            .map(|r| {
                let reason = r
                    .reason
                    .as_deref()
                    .map(|reason| format!("\n  {}", escape_html(reason)))
                    .unwrap_or_default();
                format!(
                    "{} | {} to {} ({} days) | {}{}",
                    r.leave_type.to_uppercase(),
                    r.start_date.format("%d %b %Y"),
                    r.end_date.format("%d %b %Y"),
                    r.days,
                    r.status.to_uppercase(),
                    reason
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let text = format!("<b>LEAVE REQUESTS</b>\n{}\n{}", SEPARATOR, body);
    (text, back_to_leave())
}

pub fn render_balance(balance: &LeaveBalance) -> Screen {
    let text = format!(
        "<b>LEAVE BALANCE {year}</b>\n\
         {sep}\n\
         Annual: {a_used}/{a_total} used, <b>{a_left} left</b>\n\
         Sick: {s_used}/{s_total} used, <b>{s_left} left</b>",
        year = balance.year,
        sep = SEPARATOR,
        a_used = balance.annual_used,
        a_total = balance.annual_total,
        a_left = balance.annual_remaining(),
        s_used = balance.sick_used,
        s_total = balance.sick_total,
        s_left = balance.sick_remaining(),
    );
    (text, back_to_leave())
}

pub(super) fn status_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let requests = leave::recent_requests(ctx.conn, ctx.employee.id, LEAVE_STATUS_LIMIT)?;
    Ok(render_status(&requests))
}

pub(super) fn balance_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let balance = leave::balance(ctx.conn, ctx.employee.id, ctx.now.year())?;
    Ok(render_balance(&balance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::menu::testing::{now, Fixture, TELEGRAM_ID};
    use chrono::NaiveDate;
    use staffcore::scoring::FixedEngagement;

    #[test]
    fn default_balance_screen() {
        let fx = Fixture::new();
        let conn = fx.conn();
        let ctx = ScreenContext {
            conn: &conn,
            employee: &fx.employee,
            telegram_user_id: TELEGRAM_ID,
            now: now(),
            engagement: &FixedEngagement(80.0),
            sessions: &fx.sessions,
        };

        let (text, _) = balance_screen(&ctx).unwrap();
        assert!(text.contains("LEAVE BALANCE 2025"));
        assert!(text.contains("Annual: 0/12 used, <b>12 left</b>"));
        assert!(text.contains("Sick: 0/12 used, <b>12 left</b>"));
    }

    #[test]
    fn status_lists_requests() {
        let fx = Fixture::new();
        let conn = fx.conn();
        let day = |d| NaiveDate::from_ymd_opt(2025, 7, d).unwrap();
        leave::insert_request(&conn, fx.employee.id, "annual", day(14), day(16), Some("family <trip>")).unwrap();

        let requests = leave::recent_requests(&conn, fx.employee.id, LEAVE_STATUS_LIMIT).unwrap();
        let (text, _) = render_status(&requests);
        assert!(text.contains("ANNUAL | 14 Jul 2025 to 16 Jul 2025 (3 days) | PENDING"));
        assert!(text.contains("family &lt;trip&gt;"));

        let (empty, _) = render_status(&[]);
        assert!(empty.contains("No leave requests."));
    }
}
