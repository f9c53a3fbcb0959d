//! Core utilities, configuration, and common functionality

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AppError, AppResult};
pub use logging::init_logger;
pub use utils::{escape_html, format_rupiah};
