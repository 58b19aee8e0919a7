use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "recall-cli", version, about = "Recall CLI -- flashcard review from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available knowledge bases
    Files,
    /// Run an interactive review session
    Review {
        /// Knowledge-base file name (with or without .json)
        base: String,
        /// Ignore saved progress and start over
        #[arg(long)]
        fresh: bool,
        /// Shuffle seed for reproducible sessions
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show or export review statistics
    Report {
        /// Knowledge-base file name
        base: String,
        /// Output format: table, csv, txt or html
        #[arg(long, default_value = "table")]
        format: String,
        /// Write to a file (or into a directory) instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Edit a card's content
    Edit {
        /// Knowledge-base file name
        base: String,
        /// Card id to edit
        id: String,
        /// New question text
        #[arg(long)]
        question: String,
        /// New answer text
        #[arg(long)]
        answer: String,
    },
    /// Delete saved progress for a knowledge base
    Reset {
        /// Knowledge-base file name
        base: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Files => commands::files::run(),
        Commands::Review { base, fresh, seed } => commands::review::run(&base, fresh, seed),
        Commands::Report {
            base,
            format,
            output,
        } => commands::report::run(&base, &format, output),
        Commands::Edit {
            base,
            id,
            question,
            answer,
        } => commands::edit::run(&base, &id, &question, &answer),
        Commands::Reset { base } => commands::reset::run(&base),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
