use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, ParseMode};

use staffcore::storage::employees;
use staffcore::{get_connection, AppResult};

use super::{back_to_main, not_registered_screen, render, Screen, ScreenContext};
use crate::telegram::handlers::HandlerDeps;
use crate::telegram::{Bot, MenuAction};

const SCREEN_ERROR: &str = "Something went wrong while loading this screen. Please try again.";

/// Resolves the user's employee record and builds the screen for `action`.
///
/// Unlinked users get the not-registered screen whatever the action.
pub fn screen_for(deps: &HandlerDeps, telegram_user_id: i64, action: MenuAction) -> AppResult<Screen> {
    let conn = get_connection(&deps.db_pool)?;
    let Some(employee) = employees::get_by_telegram_id(&conn, telegram_user_id)? else {
        log::info!("Unregistered user {} asked for {}", telegram_user_id, action);
        return Ok(not_registered_screen());
    };

    let ctx = ScreenContext {
        conn: &conn,
        employee: &employee,
        telegram_user_id,
        now: deps.clock.now(),
        engagement: deps.engagement.as_ref(),
        sessions: deps.assistant.sessions(),
    };
    render(action, &ctx)
}

/// Handles callback queries from the menu inline keyboards.
///
/// The query is always answered; unknown data is logged and dropped. The
/// screen replaces the message the button was attached to.
pub async fn handle_menu_callback(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let Some(action) = MenuAction::parse(data) else {
        log::warn!("Unknown callback data {:?} from user {}", data, q.from.id);
        return Ok(());
    };

    let chat_id = q.message.as_ref().map(|m| m.chat().id);
    let message_id = q.message.as_ref().map(|m| m.id());
    let (Some(chat_id), Some(message_id)) = (chat_id, message_id) else {
        return Ok(());
    };
    let Ok(user_id) = i64::try_from(q.from.id.0) else {
        return Ok(());
    };

    let (text, keyboard) = match screen_for(&deps, user_id, action) {
        Ok(screen) => screen,
        Err(e) => {
            log::error!("Failed to build {} screen for user {}: {}", action, user_id, e);
            (
                SCREEN_ERROR.to_string(),
                InlineKeyboardMarkup::new(vec![back_to_main()]),
            )
        }
    };

    if let Err(e) = bot
        .edit_message_text(chat_id, message_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await
    {
        // Pressing the same button twice leaves the message unchanged, which Telegram rejects.
        log::warn!("Failed to edit menu message in chat {}: {}", chat_id, e);
    }

    Ok(())
}
