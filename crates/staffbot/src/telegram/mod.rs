//! Telegram bot integration: setup, dispatcher schema and menu screens

pub mod action;
pub mod bot;
pub mod format;
pub mod handlers;
pub mod menu;

use teloxide::types::InlineKeyboardButton;

pub use action::{MenuAction, MAX_HISTORY_PAGE};
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};

pub type Bot = teloxide::Bot;

/// Inline button carrying callback data.
pub fn cb(text: impl Into<String>, data: impl Into<String>) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.into(), data.into())
}
