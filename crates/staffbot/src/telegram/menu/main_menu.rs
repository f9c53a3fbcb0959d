use teloxide::types::InlineKeyboardMarkup;

use staffcore::core::types::AttendanceRecord;
use staffcore::core::{escape_html, format_rupiah};
use staffcore::reports::{gamification_for, performance_for};
use staffcore::scoring::{GamificationState, PerformanceState};
use staffcore::storage::{attendance, payroll};
use staffcore::AppResult;

use super::{Screen, ScreenContext};
use crate::telegram::format::{progress_bar, stars, time_or_dash, SEPARATOR};
use crate::telegram::{cb, MenuAction};

/// Dashboard data for the main menu.
pub struct MainMenuSummary<'a> {
    pub name: &'a str,
    pub today: Option<&'a AttendanceRecord>,
    pub current_salary: Option<f64>,
    pub gamification: &'a GamificationState,
    pub performance: &'a PerformanceState,
}

pub fn main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            cb("Attendance", MenuAction::Attendance.as_data()),
            cb("Payroll", MenuAction::Payroll.as_data()),
        ],
        vec![
            cb("Leave", MenuAction::Leave.as_data()),
            cb("Performance", MenuAction::Performance.as_data()),
        ],
        vec![
            cb("Gamification", MenuAction::Gamification.as_data()),
            cb("Leaderboard", MenuAction::Leaderboard.as_data()),
        ],
        vec![
            cb("Smart Alerts", MenuAction::Alerts.as_data()),
            cb("Analytics", MenuAction::Analytics.as_data()),
        ],
        vec![
            cb("My Profile", MenuAction::Profile.as_data()),
            cb("AI Assistant", MenuAction::AiMode.as_data()),
        ],
        vec![cb("About", MenuAction::About.as_data())],
    ])
}

pub fn render_main_menu(summary: &MainMenuSummary<'_>) -> Screen {
    let g = summary.gamification;
    let p = summary.performance;

    let level_line = match g.next_level {
        Some(next) => format!("{} {} to {}", progress_bar(g.level_progress()), g.points_needed, next),
        None => format!("{} top level reached", progress_bar(100.0)),
    };
    let salary = summary
        .current_salary
        .map(format_rupiah)
        .unwrap_or_else(|| "not available".to_string());

    let text = format!(
        "<b>STAFF SELF-SERVICE</b>\n\
         Hello, {name}!\n\
         {sep}\n\
         <b>Today</b>\n\
         Clock in: {clock_in} | Clock out: {clock_out}\n\
         <b>Salary this month:</b> {salary}\n\
         {sep}\n\
         <b>Level:</b> [{badge}] {level} - {points} pts\n\
         {level_line}\n\
         <b>Performance:</b> {rating} {stars}\n\
         {perf_bar}\n\
         <b>Streak:</b> {streak} days",
        name = escape_html(summary.name),
        sep = SEPARATOR,
        clock_in = time_or_dash(summary.today.and_then(|r| r.clock_in)),
        clock_out = time_or_dash(summary.today.and_then(|r| r.clock_out)),
        salary = salary,
        badge = g.level.badge(),
        level = g.level,
        points = g.points,
        level_line = level_line,
        rating = p.rating,
        stars = stars(p.rating.stars()),
        perf_bar = progress_bar(p.total),
        streak = g.current_streak,
    );

    (text, main_menu_keyboard())
}

/// Loads the dashboard and leaves AI chat mode.
pub fn main_menu_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    ctx.sessions.set_ai_mode(ctx.telegram_user_id, false);

    let today = ctx.now.date();
    let employee_id = ctx.employee.id;
    let record = attendance::for_day(ctx.conn, employee_id, today)?;
    let slip = payroll::for_period(ctx.conn, employee_id, &payroll::period_of(today))?;
    let gamification = gamification_for(ctx.conn, employee_id, today)?;
    let performance = performance_for(ctx.conn, employee_id, today, ctx.engagement)?;

    Ok(render_main_menu(&MainMenuSummary {
        name: &ctx.employee.name,
        today: record.as_ref(),
        current_salary: slip.map(|s| s.total),
        gamification: &gamification,
        performance: &performance,
    }))
}

/// Greeting for users who have not linked an employee record yet.
pub fn welcome_text(first_name: &str) -> String {
    format!(
        "Welcome, {}!\n\n\
         This bot is your HR self-service desk: attendance, payroll, leave and an AI assistant.\n\
         Send /register to link your Telegram account to your employee record.",
        escape_html(first_name)
    )
}
