use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "staffbot")]
#[command(author, version, about = "Telegram self-service HR bot", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run,

    /// Apply database migrations and exit
    Migrate,

    /// Answer one question with the HR assistant
    Ask {
        /// The question to ask
        question: String,

        /// Employee whose data is added to the prompt
        #[arg(short, long)]
        employee_id: Option<i64>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
