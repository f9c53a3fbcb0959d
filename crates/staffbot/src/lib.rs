//! Staffbot - Telegram self-service HR bot
//!
//! Thin Telegram layer over `staffcore`: command and callback routing, menu
//! screens and the AI chat mode.
//!
//! # Module Structure
//!
//! - `cli`: command-line interface
//! - `telegram`: bot setup, dispatcher schema, actions and screens

pub mod cli;
pub mod telegram;
