//! Gamification, leaderboard, alerts and performance screens.

use teloxide::types::InlineKeyboardMarkup;

use staffcore::core::escape_html;
use staffcore::reports::{gamification_for, leaderboard, performance_for};
use staffcore::scoring::{smart_alerts, Alert, GamificationState, LeaderboardEntry, PerformanceState, Rating};
use staffcore::AppResult;

use super::{back_row, back_to_main, Screen, ScreenContext};
use crate::telegram::format::{progress_bar, stars, SEPARATOR};
use crate::telegram::{cb, MenuAction};

fn main_only() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![back_to_main()])
}

pub fn render_gamification(state: &GamificationState) -> Screen {
    let next = match state.next_level {
        Some(next) => format!("Next level: {} ({} points needed)", next, state.points_needed),
        None => "You are at the top level.".to_string(),
    };
    let achievements = if state.achievements.is_empty() {
        "None yet. Keep showing up!".to_string()
    } else {
        state
            .achievements
            .iter()
            .map(|a| format!("- {}", a))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let text = format!(
        "<b>GAMIFICATION</b> (last 30 days)\n\
         {sep}\n\
         Level: [{badge}] <b>{level}</b>\n\
         Points: {points} ({base} base + {bonus} streak bonus)\n\
         {bar}\n\
         {next}\n\
         {sep}\n\
         Current streak: {current} days\n\
         Best streak: {max} days\n\
         Attendance: {attendance:.1}%\n\
         Punctuality: {punctuality:.1}%\n\
         {sep}\n\
         <b>Achievements</b>\n\
         {achievements}",
        sep = SEPARATOR,
        badge = state.level.badge(),
        level = state.level,
        points = state.points,
        base = state.base_points,
        bonus = state.streak_bonus,
        bar = progress_bar(state.level_progress()),
        next = next,
        current = state.current_streak,
        max = state.max_streak,
        attendance = state.attendance_rate,
        punctuality = state.punctuality_rate,
        achievements = achievements,
    );

    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![
            cb("Leaderboard", MenuAction::Leaderboard.as_data()),
            cb("Smart Alerts", MenuAction::Alerts.as_data()),
        ],
        back_to_main(),
    ]);
    (text, keyboard)
}

pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> Screen {
    let body = if entries.is_empty() {
        "No employees to rank yet.".to_string()
    } else {
        entries
            .iter()
            .map(|e| {
                let line = format!(
                    "{}. [{}] {} - {} pts",
                    e.rank,
                    e.level.badge(),
                    escape_html(&e.name),
                    e.points
                );
                if e.is_me {
                    format!("<b>{} (you)</b>", line)
                } else {
                    line
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let text = format!("<b>LEADERBOARD</b>\n{}\n{}", SEPARATOR, body);
    let keyboard = InlineKeyboardMarkup::new(vec![
        back_row(MenuAction::Gamification, "<< Gamification"),
        back_to_main(),
    ]);
    (text, keyboard)
}

pub fn render_alerts(alerts: &[Alert]) -> Screen {
    let body = if alerts.is_empty() {
        "No alerts right now.".to_string()
    } else {
        alerts
            .iter()
            .map(|a| format!("- {}", a.message()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    (format!("<b>SMART ALERTS</b>\n{}\n{}", SEPARATOR, body), main_only())
}

pub fn render_analytics(g: &GamificationState, p: &PerformanceState) -> Screen {
    let text = format!(
        "<b>ANALYTICS DASHBOARD</b>\n\
         {sep}\n\
         <b>Performance</b> (last 90 days)\n\
         Score: {total:.1} {rating} {stars}\n\
         Attendance: {p_att:.1}%\n\
         Punctuality: {p_punct:.1}%\n\
         Avg daily hours: {hours:.2}\n\
         {sep}\n\
         <b>Gamification</b> (last 30 days)\n\
         Level: {level}, {points} pts\n\
         Attendance: {g_att:.1}%\n\
         Punctuality: {g_punct:.1}%\n\
         Streak: {current} days (best {max})\n\
         Achievements: {achievements}",
        sep = SEPARATOR,
        total = p.total,
        rating = p.rating,
        stars = stars(p.rating.stars()),
        p_att = p.attendance_rate,
        p_punct = p.punctuality_rate,
        hours = p.avg_daily_hours,
        level = g.level,
        points = g.points,
        g_att = g.attendance_rate,
        g_punct = g.punctuality_rate,
        current = g.current_streak,
        max = g.max_streak,
        achievements = g.achievements.len(),
    );
    (text, main_only())
}

pub fn render_performance_menu(p: &PerformanceState) -> Screen {
    let summary = if p.rating == Rating::NoData {
        "No attendance data in the last 90 days.".to_string()
    } else {
        format!("{} {}\n{}", p.rating, stars(p.rating.stars()), progress_bar(p.total))
    };
    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![
            cb("Score Details", MenuAction::PerfScore.as_data()),
            cb("Analytics", MenuAction::Analytics.as_data()),
        ],
        back_to_main(),
    ]);
    (format!("<b>PERFORMANCE</b>\n{}\n{}", SEPARATOR, summary), keyboard)
}

pub fn render_perf_score(p: &PerformanceState) -> Screen {
    let text = format!(
        "<b>PERFORMANCE SCORE</b>\n\
         {sep}\n\
         Total: <b>{total:.1}</b> / 100\n\
         Rating: {rating} {stars}\n\
         {bar}\n\
         {sep}\n\
         Attendance rate: {att:.1}% (weight 40%)\n\
         Punctuality rate: {punct:.1}% (weight 20%)\n\
         Avg daily hours: {hours:.2} of 8 (weight 20%)\n\
         Engagement: sampled (weight 20%)",
        sep = SEPARATOR,
        total = p.total,
        rating = p.rating,
        stars = stars(p.rating.stars()),
        bar = progress_bar(p.total),
        att = p.attendance_rate,
        punct = p.punctuality_rate,
        hours = p.avg_daily_hours,
    );
    let keyboard = InlineKeyboardMarkup::new(vec![
        back_row(MenuAction::Performance, "<< Performance"),
        back_to_main(),
    ]);
    (text, keyboard)
}

pub(super) fn gamification_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let state = gamification_for(ctx.conn, ctx.employee.id, ctx.now.date())?;
    Ok(render_gamification(&state))
}

pub(super) fn leaderboard_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let entries = leaderboard(ctx.conn, ctx.employee.id, ctx.now.date())?;
    Ok(render_leaderboard(&entries))
}

pub(super) fn alerts_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let state = gamification_for(ctx.conn, ctx.employee.id, ctx.now.date())?;
    Ok(render_alerts(&smart_alerts(&state)))
}

pub(super) fn analytics_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let today = ctx.now.date();
    let g = gamification_for(ctx.conn, ctx.employee.id, today)?;
    let p = performance_for(ctx.conn, ctx.employee.id, today, ctx.engagement)?;
    Ok(render_analytics(&g, &p))
}

pub(super) fn performance_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let p = performance_for(ctx.conn, ctx.employee.id, ctx.now.date(), ctx.engagement)?;
    Ok(render_performance_menu(&p))
}

pub(super) fn perf_score_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let p = performance_for(ctx.conn, ctx.employee.id, ctx.now.date(), ctx.engagement)?;
    Ok(render_perf_score(&p))
}
