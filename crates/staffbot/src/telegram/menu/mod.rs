//! Menu screens behind the inline keyboards.
//!
//! Each screen module has pure `render_*` builders returning the text and the
//! keyboard, and a `*_screen` loader that reads what the builder needs.

mod attendance;
mod callback_router;
mod leave;
mod main_menu;
mod payroll;
mod profile;
mod rewards;

use chrono::NaiveDateTime;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use staffcore::assistant::SessionStore;
use staffcore::scoring::EngagementSource;
use staffcore::storage::employees::Employee;
use staffcore::{AppResult, DbConnection};

use crate::telegram::{cb, MenuAction};

pub use callback_router::{handle_menu_callback, screen_for};
pub use main_menu::{main_menu_keyboard, main_menu_screen, render_main_menu, welcome_text, MainMenuSummary};

/// Text and keyboard of one screen.
pub type Screen = (String, InlineKeyboardMarkup);

/// Short-circuit reply for users without a linked employee record.
pub const NOT_REGISTERED: &str =
    "You are not registered yet.\nSend /register to link your Telegram account to your employee record.";

/// Everything a screen may read or change for one request.
pub struct ScreenContext<'a> {
    pub conn: &'a DbConnection,
    pub employee: &'a Employee,
    pub telegram_user_id: i64,
    pub now: NaiveDateTime,
    pub engagement: &'a dyn EngagementSource,
    pub sessions: &'a SessionStore,
}

/// Builds the screen for `action`, applying its side effect first (clock
/// in/out, AI mode).
pub fn render(action: MenuAction, ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    match action {
        MenuAction::MainMenu => main_menu::main_menu_screen(ctx),
        MenuAction::About => Ok(profile::render_about()),
        MenuAction::Profile => Ok(profile::render_profile(ctx.employee, ctx.now.date())),
        MenuAction::AiMode => {
            ctx.sessions.set_ai_mode(ctx.telegram_user_id, true);
            Ok(profile::render_ai_mode())
        }
        MenuAction::Attendance => attendance::attendance_screen(ctx),
        MenuAction::ClockIn => attendance::clock_in_screen(ctx),
        MenuAction::ClockOut => attendance::clock_out_screen(ctx),
        MenuAction::AttendanceHistory { page } => attendance::history_screen(ctx, page),
        MenuAction::Payroll => Ok(payroll::render_payroll_menu()),
        MenuAction::PayrollCurrent => payroll::current_screen(ctx),
        MenuAction::PayrollHistory => payroll::history_screen(ctx),
        MenuAction::Leave => Ok(leave::render_leave_menu()),
        MenuAction::LeaveStatus => leave::status_screen(ctx),
        MenuAction::LeaveBalance => leave::balance_screen(ctx),
        MenuAction::Gamification => rewards::gamification_screen(ctx),
        MenuAction::Leaderboard => rewards::leaderboard_screen(ctx),
        MenuAction::Alerts => rewards::alerts_screen(ctx),
        MenuAction::Analytics => rewards::analytics_screen(ctx),
        MenuAction::Performance => rewards::performance_screen(ctx),
        MenuAction::PerfScore => rewards::perf_score_screen(ctx),
    }
}

/// Screen shown to unregistered users.
pub fn not_registered_screen() -> Screen {
    (NOT_REGISTERED.to_string(), empty_keyboard())
}

/// Markup without buttons, for plain replies.
pub fn empty_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(Vec::<Vec<InlineKeyboardButton>>::new())
}

fn back_row(to: MenuAction, label: &str) -> Vec<InlineKeyboardButton> {
    vec![cb(label, to.as_data())]
}

fn back_to_main() -> Vec<InlineKeyboardButton> {
    back_row(MenuAction::MainMenu, "<< Main Menu")
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    use staffcore::assistant::SessionStore;
    use staffcore::core::FixedClock;
    use staffcore::storage::employees::{self, ClaimOutcome, Employee, NewEmployee};
    use staffcore::{create_pool, get_connection, DbConnection, DbPool};

    pub const TELEGRAM_ID: i64 = 4242;

    /// Monday 30 June 2025, 07:50.
    pub fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap().and_hms_opt(7, 50, 0).unwrap()
    }

    /// On-disk pool holding one employee linked to `TELEGRAM_ID`.
    pub struct Fixture {
        _dir: TempDir,
        pub pool: DbPool,
        pub employee: Employee,
        pub sessions: SessionStore,
    }

    impl Fixture {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("menu.sqlite");
            let pool = create_pool(path.to_str().unwrap()).unwrap();
            let conn = get_connection(&pool).unwrap();
            employees::insert(
                &conn,
                &NewEmployee {
                    nik: "EMP001",
                    name: "Ani <Finance>",
                    email: Some("ani@example.com"),
                    position: Some("Accountant"),
                    department: Some("Finance"),
                    join_date: NaiveDate::from_ymd_opt(2022, 1, 1),
                    base_salary: 8_000_000.0,
                },
            )
            .unwrap();
            let employee = match employees::claim_identity(&conn, TELEGRAM_ID).unwrap() {
                ClaimOutcome::Linked(employee) => employee,
                other => panic!("unexpected claim outcome: {:?}", other),
            };
            drop(conn);

            Self {
                _dir: dir,
                pool,
                employee,
                sessions: SessionStore::new(Arc::new(FixedClock(now())), 10),
            }
        }

        pub fn conn(&self) -> DbConnection {
            get_connection(&self.pool).unwrap()
        }
    }

    /// All callback data on a keyboard, row by row.
    pub fn button_data(kb: &teloxide::types::InlineKeyboardMarkup) -> Vec<String> {
        use teloxide::types::InlineKeyboardButtonKind;

        kb.inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }
}
