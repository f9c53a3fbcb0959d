//! Staffcore - domain core for the staffbot HR self-service bot
//!
//! Everything here is free of Telegram types so it can be used from the bot,
//! the CLI and tests alike.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, clock and domain types
//! - `scoring`: gamification points, levels, streaks, performance rating, leaderboard
//! - `assistant`: knowledge ranking, conversation sessions, language-model client
//! - `storage`: SQLite pool, migrations and per-table queries
//! - `reports`: per-employee scores read from storage on demand

pub mod assistant;
pub mod core;
pub mod reports;
pub mod scoring;
pub mod storage;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use storage::{create_pool, get_connection, DbConnection, DbPool};
