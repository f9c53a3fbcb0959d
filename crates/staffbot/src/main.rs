use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use staffbot::cli::{Cli, Commands};
use staffbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use staffcore::assistant::{Assistant, SessionStore};
use staffcore::config;
use staffcore::core::{init_logger, Clock, SystemClock};
use staffcore::reports::employee_context;
use staffcore::scoring::RandomEngagement;
use staffcore::storage::{employees, knowledge};
use staffcore::{create_pool, get_connection};

/// Main entry point for the bot
///
/// Parses CLI arguments and dispatches to the matching subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from the dispatcher instead of losing them
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Migrate) => run_migrate(),
        Some(Commands::Ask { question, employee_id }) => run_ask(&question, employee_id).await,
    }
}

fn new_assistant(clock: Arc<dyn Clock>) -> Result<Assistant> {
    let sessions = SessionStore::new(clock, config::assistant::HISTORY_CAPACITY);
    let assistant = Assistant::from_env(sessions)?;
    if !assistant.has_model() {
        log::warn!("LLM_API_KEY not set, the assistant answers from the knowledge base only");
    }
    Ok(assistant)
}

async fn run_bot() -> Result<()> {
    log::info!("Starting bot, database at {}", config::DATABASE_PATH.as_str());

    let db_pool = Arc::new(
        create_pool(&config::DATABASE_PATH).map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?,
    );
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let assistant = Arc::new(new_assistant(Arc::clone(&clock))?);

    let bot = create_bot()?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let deps = HandlerDeps::new(db_pool, assistant, clock, Arc::new(RandomEngagement));
    let handler = schema(deps);

    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();
    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Bot stopped");
    Ok(())
}

/// Pool creation applies pending migrations.
fn run_migrate() -> Result<()> {
    create_pool(&config::DATABASE_PATH).map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    println!("Database {} is up to date", config::DATABASE_PATH.as_str());
    Ok(())
}

async fn run_ask(question: &str, employee_id: Option<i64>) -> Result<()> {
    let pool = create_pool(&config::DATABASE_PATH)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let (entries, context) = {
        let conn = get_connection(&pool)?;
        let entries = knowledge::all(&conn)?;
        let context = match employee_id {
            Some(id) => {
                let employee = employees::get(&conn, id)?
                    .ok_or_else(|| anyhow::anyhow!("No employee with id {}", id))?;
                Some(employee_context(&conn, &employee, clock.today())?)
            }
            None => None,
        };
        (entries, context)
    };

    let assistant = new_assistant(clock)?;
    let reply = assistant.answer(None, question, &entries, context.as_ref()).await;

    println!("{}", reply.text);
    if !reply.sources.is_empty() {
        println!("\nSources: {}", reply.sources.join(", "));
    }
    if reply.fallback {
        println!("(answered without the language model)");
    }
    Ok(())
}
