//! /start, /register and the AI chat conversation.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, ParseMode};

use staffcore::core::escape_html;
use staffcore::reports::employee_context;
use staffcore::storage::employees::{self, ClaimOutcome};
use staffcore::storage::knowledge;
use staffcore::{get_connection, AppResult};

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::menu::{empty_keyboard, not_registered_screen, screen_for, welcome_text, Screen};
use crate::telegram::{cb, Bot, MenuAction};

/// Words that leave AI chat mode.
const EXIT_WORDS: [&str; 2] = ["menu", "exit"];

const OUTSIDE_CHAT_HINT: &str = "Send /start to open the main menu.";

fn telegram_user_id(msg: &Message) -> Option<i64> {
    msg.from.as_ref().and_then(|u| i64::try_from(u.id.0).ok())
}

async fn send_screen(bot: &Bot, chat_id: ChatId, (text, keyboard): Screen) -> ResponseResult<()> {
    let mut request = bot.send_message(chat_id, text).parse_mode(ParseMode::Html);
    if !keyboard.inline_keyboard.is_empty() {
        request = request.reply_markup(keyboard);
    }
    request.await?;
    Ok(())
}

/// Main menu for linked users (leaving chat mode), welcome text otherwise.
pub fn start_reply(deps: &HandlerDeps, telegram_user_id: i64, first_name: &str) -> AppResult<Screen> {
    deps.assistant.sessions().set_ai_mode(telegram_user_id, false);
    let registered = {
        let conn = get_connection(&deps.db_pool)?;
        employees::get_by_telegram_id(&conn, telegram_user_id)?.is_some()
    };
    if !registered {
        return Ok((welcome_text(first_name), empty_keyboard()));
    }
    screen_for(deps, telegram_user_id, MenuAction::MainMenu)
}

/// Links the user to a free employee record, once.
pub fn register_reply(deps: &HandlerDeps, telegram_user_id: i64) -> AppResult<String> {
    let conn = get_connection(&deps.db_pool)?;
    let text = match employees::claim_identity(&conn, telegram_user_id)? {
        ClaimOutcome::AlreadyLinked(employee) => {
            format!("You are already registered as {}.", escape_html(&employee.name))
        }
        ClaimOutcome::Linked(employee) => format!(
            "Registration successful! You are linked to {} (NIK {}).\nSend /start to open the main menu.",
            escape_html(&employee.name),
            escape_html(&employee.nik)
        ),
        ClaimOutcome::NoneAvailable => "No employee data available. Please contact HR.".to_string(),
    };
    Ok(text)
}

/// Answers one chat-mode message.
///
/// `menu`/`exit` go back to the main menu. Knowledge and employee context
/// are read before the model call so no connection is held across it.
pub async fn chat_reply(deps: &HandlerDeps, telegram_user_id: i64, text: &str) -> AppResult<Screen> {
    let trimmed = text.trim();
    if EXIT_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
        return screen_for(deps, telegram_user_id, MenuAction::MainMenu);
    }

    let (entries, context) = {
        let conn = get_connection(&deps.db_pool)?;
        let Some(employee) = employees::get_by_telegram_id(&conn, telegram_user_id)? else {
            deps.assistant.sessions().set_ai_mode(telegram_user_id, false);
            return Ok(not_registered_screen());
        };
        let entries = knowledge::all(&conn)?;
        let context = employee_context(&conn, &employee, deps.clock.today())?;
        (entries, context)
    };

    let reply = deps
        .assistant
        .answer(Some(telegram_user_id), trimmed, &entries, Some(&context))
        .await;
    log::info!(
        "Assistant reply for user {} (fallback: {}, sources: {})",
        telegram_user_id,
        reply.fallback,
        reply.sources.len()
    );

    let mut body = escape_html(&reply.text);
    if !reply.sources.is_empty() {
        body.push_str(&format!("\n\n<i>Sources: {}</i>", escape_html(&reply.sources.join(", "))));
    }
    let keyboard = InlineKeyboardMarkup::new(vec![vec![cb("<< Main Menu", MenuAction::MainMenu.as_data())]]);
    Ok((body, keyboard))
}

pub async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(user_id) = telegram_user_id(msg) else {
        return Ok(());
    };
    let first_name = msg.from.as_ref().map(|u| u.first_name.as_str()).unwrap_or_default();
    let screen = start_reply(deps, user_id, first_name)?;
    send_screen(bot, msg.chat.id, screen).await?;
    Ok(())
}

pub async fn handle_register_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(user_id) = telegram_user_id(msg) else {
        return Ok(());
    };
    let text = register_reply(deps, user_id)?;
    bot.send_message(msg.chat.id, text).parse_mode(ParseMode::Html).await?;
    Ok(())
}

/// Plain text: answered by the assistant in chat mode, a hint otherwise.
pub async fn handle_text_message(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let (Some(user_id), Some(text)) = (telegram_user_id(msg), msg.text()) else {
        return Ok(());
    };
    if !deps.assistant.sessions().ai_mode(user_id) {
        bot.send_message(msg.chat.id, OUTSIDE_CHAT_HINT).await?;
        return Ok(());
    }

    let screen = chat_reply(deps, user_id, text).await?;
    send_screen(bot, msg.chat.id, screen).await?;
    Ok(())
}
