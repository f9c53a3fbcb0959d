//! Register, open the menu, clock in and chat, without a Telegram server.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use staffbot::telegram::handlers::{chat_reply, register_reply, start_reply};
use staffbot::telegram::menu::{screen_for, NOT_REGISTERED};
use staffbot::telegram::{HandlerDeps, MenuAction};
use staffcore::assistant::{Assistant, SessionStore, APOLOGY};
use staffcore::core::{Clock, FixedClock};
use staffcore::scoring::FixedEngagement;
use staffcore::storage::employees::{self, NewEmployee};
use staffcore::storage::knowledge;
use staffcore::{create_pool, get_connection};

const ANI: i64 = 1001;
const BUDI: i64 = 1002;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap().and_hms_opt(hour, minute, 0).unwrap()
}

/// Deps over a fresh on-disk database with one free employee record and no model.
fn setup(now: NaiveDateTime) -> (TempDir, HandlerDeps) {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_pool(dir.path().join("bot.sqlite").to_str().unwrap()).unwrap();
    {
        let conn = get_connection(&pool).unwrap();
        employees::insert(
            &conn,
            &NewEmployee {
                nik: "EMP001",
                name: "Ani Lestari",
                email: None,
                position: Some("Accountant"),
                department: Some("Finance"),
                join_date: None,
                base_salary: 8_000_000.0,
            },
        )
        .unwrap();
        knowledge::insert(
            &conn,
            "leave",
            "Leave Request Procedure",
            "Submit annual leave three days ahead through HR.",
            &["cuti", "leave"],
        )
        .unwrap();
    }

    let clock: Arc<dyn Clock> = Arc::new(FixedClock(now));
    let assistant = Assistant::new(None, SessionStore::new(Arc::clone(&clock), 10));
    let deps = HandlerDeps::new(Arc::new(pool), Arc::new(assistant), clock, Arc::new(FixedEngagement(85.0)));
    (dir, deps)
}

#[test]
fn register_links_once_and_only_while_records_are_free() {
    let (_dir, deps) = setup(at(7, 50));

    let first = register_reply(&deps, ANI).unwrap();
    assert!(first.starts_with("Registration successful!"));
    assert!(first.contains("Ani Lestari (NIK EMP001)"));

    assert_eq!(register_reply(&deps, ANI).unwrap(), "You are already registered as Ani Lestari.");
    assert_eq!(
        register_reply(&deps, BUDI).unwrap(),
        "No employee data available. Please contact HR."
    );
}

#[test]
fn start_welcomes_strangers_and_shows_menu_to_employees() {
    let (_dir, deps) = setup(at(7, 50));

    let (welcome, kb) = start_reply(&deps, ANI, "Ani").unwrap();
    assert!(welcome.contains("/register"));
    assert!(kb.inline_keyboard.is_empty());

    register_reply(&deps, ANI).unwrap();
    deps.assistant.sessions().set_ai_mode(ANI, true);

    let (menu, kb) = start_reply(&deps, ANI, "Ani").unwrap();
    assert!(menu.contains("Hello, Ani Lestari!"));
    assert!(!kb.inline_keyboard.is_empty());
    assert!(!deps.assistant.sessions().ai_mode(ANI));
}

#[test]
fn callbacks_require_a_linked_identity() {
    let (_dir, deps) = setup(at(7, 50));

    for action in [MenuAction::ClockIn, MenuAction::Payroll, MenuAction::AiMode] {
        let (text, _) = screen_for(&deps, BUDI, action).unwrap();
        assert_eq!(text, NOT_REGISTERED);
    }
    assert!(!deps.assistant.sessions().ai_mode(BUDI));
}

#[test]
fn late_clock_in_shows_on_the_main_menu() {
    let (_dir, deps) = setup(at(8, 20));
    register_reply(&deps, ANI).unwrap();

    let (text, _) = screen_for(&deps, ANI, MenuAction::ClockIn).unwrap();
    assert!(text.contains("Status: LATE"));

    let (menu, _) = screen_for(&deps, ANI, MenuAction::MainMenu).unwrap();
    assert!(menu.contains("Clock in: 08:20 | Clock out: -"));
}

#[tokio::test]
async fn chat_without_model_answers_from_knowledge_base() {
    let (_dir, deps) = setup(at(10, 0));
    register_reply(&deps, ANI).unwrap();
    screen_for(&deps, ANI, MenuAction::AiMode).unwrap();
    assert!(deps.assistant.sessions().ai_mode(ANI));

    let (text, _) = chat_reply(&deps, ANI, "how many days ahead for cuti?").await.unwrap();
    assert!(text.starts_with("Leave Request Procedure: Submit annual leave"));
    assert!(text.contains("<i>Sources: Leave Request Procedure</i>"));
    assert_eq!(deps.assistant.sessions().history_len(ANI), 0);

    let (text, _) = chat_reply(&deps, ANI, "what is the wifi password").await.unwrap();
    assert_eq!(text, APOLOGY);

    let (menu, _) = chat_reply(&deps, ANI, "  EXIT ").await.unwrap();
    assert!(menu.contains("STAFF SELF-SERVICE"));
    assert!(!deps.assistant.sessions().ai_mode(ANI));
}
