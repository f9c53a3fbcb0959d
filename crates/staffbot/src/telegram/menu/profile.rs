use chrono::NaiveDate;
use indoc::indoc;
use teloxide::types::InlineKeyboardMarkup;

use staffcore::core::escape_html;
use staffcore::storage::employees::Employee;

use super::{back_to_main, Screen};
use crate::telegram::format::SEPARATOR;

fn or_dash(value: Option<&str>) -> String {
    value.map(escape_html).unwrap_or_else(|| "-".to_string())
}

pub fn render_profile(employee: &Employee, today: NaiveDate) -> Screen {
    let joined = match (employee.join_date, employee.tenure(today)) {
        (Some(date), Some(tenure)) => format!(
            "{} ({} years {} months)",
            date.format("%d %b %Y"),
            tenure.years,
            tenure.months
        ),
        _ => "-".to_string(),
    };

    let text = format!(
        "<b>MY PROFILE</b>\n\
         {sep}\n\
         Name: {name}\n\
         NIK: {nik}\n\
         Email: {email}\n\
         Position: {position}\n\
         Department: {department}\n\
         Status: {status}\n\
         Joined: {joined}",
        sep = SEPARATOR,
        name = escape_html(&employee.name),
        nik = escape_html(&employee.nik),
        email = or_dash(employee.email.as_deref()),
        position = or_dash(employee.position.as_deref()),
        department = or_dash(employee.department.as_deref()),
        status = employee.status.to_uppercase(),
        joined = joined,
    );
    (text, InlineKeyboardMarkup::new(vec![back_to_main()]))
}

const ABOUT: &str = indoc! {"
    <b>ABOUT</b>
    Staff self-service bot.

    - Attendance: clock in/out and history
    - Payroll: current slip and the last 12 months
    - Leave: request status and yearly balance
    - Gamification: points, levels, streaks and a leaderboard
    - AI assistant: answers HR questions from the company knowledge base

    Send /start at any time to come back to the main menu."};

pub fn render_about() -> Screen {
    (ABOUT.to_string(), InlineKeyboardMarkup::new(vec![back_to_main()]))
}

const AI_MODE: &str = indoc! {"
    <b>AI ASSISTANT</b>
    Ask me anything about HR policies, payroll, leave or attendance.
    Just type your question.

    Type <b>menu</b> or <b>exit</b> (or send /start) to leave chat mode."};

pub fn render_ai_mode() -> Screen {
    (AI_MODE.to_string(), InlineKeyboardMarkup::new(vec![back_to_main()]))
}
