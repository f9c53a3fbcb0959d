use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;
use std::time::Duration;

/// Configuration values for the bot, read once from the environment.
///
/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: staffbot.sqlite
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "staffbot.sqlite".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: staffbot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "staffbot.log".to_string()));

/// Default log filter when RUST_LOG is not set
/// Read from LOG_LEVEL environment variable
pub static LOG_LEVEL: Lazy<String> = Lazy::new(|| env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server (local telegram-bot-api), if any
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Language-model API configuration
pub mod llm {
    use super::*;

    /// API key for the chat-completion provider.
    /// Read from LLM_API_KEY, falling back to GROQ_API_KEY.
    /// `None` disables the model; the assistant then answers from the knowledge base only.
    pub static API_KEY: Lazy<Option<SecretString>> = Lazy::new(|| {
        env::var("LLM_API_KEY")
            .or_else(|_| env::var("GROQ_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from)
    });

    /// Base URL of an OpenAI-compatible API (without `/v1/chat/completions`)
    pub static API_BASE: Lazy<String> =
        Lazy::new(|| env::var("LLM_API_BASE").unwrap_or_else(|_| "https://api.groq.com/openai".to_string()));

    /// Model identifier sent with every request
    pub static MODEL: Lazy<String> =
        Lazy::new(|| env::var("LLM_MODEL").unwrap_or_else(|_| "llama-3.1-8b-instant".to_string()));

    /// Sampling temperature
    pub const TEMPERATURE: f32 = 0.3;

    /// Cap on generated tokens per answer
    pub const MAX_TOKENS: u32 = 200;

    /// Request timeout (in seconds)
    pub const TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}

/// Scoring windows and thresholds
pub mod scoring {
    /// Trailing window for gamification (days)
    pub const GAMIFICATION_WINDOW_DAYS: i64 = 30;

    /// Trailing window for the performance score (days)
    pub const PERFORMANCE_WINDOW_DAYS: i64 = 90;

    /// Latest clock-in hour that still counts as on time for scoring.
    /// Minutes are ignored: 08:59 is on time.
    pub const ON_TIME_LAST_HOUR: u32 = 8;

    /// Streak length from which every further present day earns a bonus
    pub const STREAK_BONUS_FROM: u32 = 7;

    /// Bonus points per qualifying streak day
    pub const STREAK_BONUS_POINTS: u32 = 10;

    /// Expected working hours per day
    pub const STANDARD_DAILY_HOURS: f64 = 8.0;
}

/// Assistant / conversation configuration
pub mod assistant {
    /// Turns kept per user session
    pub const HISTORY_CAPACITY: usize = 10;

    /// Turns surfaced in a prompt
    pub const PROMPT_TURNS: usize = 3;

    /// Knowledge entries placed into the prompt
    pub const PROMPT_TOP_K: usize = 2;

    /// Bonus added when an expanded term appears in the entry title
    pub const TITLE_BONUS: u32 = 5;
}

/// Menu / screen configuration
pub mod menu {
    /// Employees considered for the leaderboard
    pub const LEADERBOARD_SIZE: usize = 10;

    /// Attendance rows per history page
    pub const ATTENDANCE_PAGE_SIZE: usize = 5;

    /// Payroll periods shown in the history screen
    pub const PAYROLL_HISTORY_MONTHS: usize = 12;

    /// Leave requests shown in the status screen
    pub const LEAVE_STATUS_LIMIT: usize = 5;

    /// Clock-in grace period shown to the user (minutes after 08:00)
    pub const LATE_GRACE_MINUTES: u32 = 15;
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Telegram HTTP requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
