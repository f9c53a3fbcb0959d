//! Telegram update handlers
//!
//! - `types`: handler dependencies and error type
//! - `schema`: dispatcher tree
//! - `commands`: /start, /register and the AI chat replies

pub mod commands;
pub mod schema;
pub mod types;

pub use commands::{chat_reply, register_reply, start_reply};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
