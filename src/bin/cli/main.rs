mod app;
mod cache;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "recall", about = "Flashcards with spaced repetition and quizzes", version)]
struct Cli {
    /// Use a specific data directory (default: ~/.local/share/recall)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new card
    Add {
        /// Question text
        question: String,
        /// Answer text
        answer: String,
        /// Topic tag (default: general)
        #[arg(long)]
        topic: Option<String>,
        /// Where the card came from (usually a file path)
        #[arg(long)]
        source: Option<String>,
    },

    /// List cards
    List {
        /// Only cards with this topic
        #[arg(long)]
        topic: Option<String>,
    },

    /// List cards due for review
    Due,

    /// Show due count, streak and mastery
    Digest,

    /// Pick a card to quiz on, preferring ones related to recent files
    Pick {
        /// Recently touched file (repeatable)
        #[arg(long = "from-file")]
        from_files: Vec<String>,
    },

    /// Reveal the answer to the last picked card and record a review
    Reveal,

    /// Record a review for a card
    Review {
        /// Card ID (or unique prefix)
        id: String,
        /// Quality rating 0-5
        #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
        quality: u8,
    },

    /// Delete a card
    Rm {
        /// Card ID (or unique prefix)
        id: String,
    },

    /// Multi-step quiz session
    #[command(subcommand)]
    Quiz(QuizCommand),
}

#[derive(Subcommand)]
enum QuizCommand {
    /// Start a quiz over due cards
    Start {
        /// Practice any cards, not just due ones
        #[arg(long)]
        practice: bool,
        /// Maximum number of cards
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,
    },

    /// Answer the current question
    Answer {
        /// Your answer
        text: String,
    },

    /// Skip the current question
    Skip,

    /// Abandon the quiz in progress
    Clear,

    /// Quiz on a one-off question that is not stored
    Adhoc {
        question: String,
        answer: String,
        #[arg(long)]
        source: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Add {
            question,
            answer,
            topic,
            source,
        } => {
            commands::add::run(&app, question, answer, topic, source, &cli.format, use_color)?;
        }
        Command::List { topic } => {
            commands::list::run(&app, topic.as_deref(), &cli.format, use_color)?;
        }
        Command::Due => {
            commands::due::run(&app, &cli.format, use_color)?;
        }
        Command::Digest => {
            commands::digest::run(&app, &cli.format, use_color)?;
        }
        Command::Pick { from_files } => {
            commands::pick::run(&app, &from_files, &cli.format, use_color)?;
        }
        Command::Reveal => {
            commands::reveal::run(&app, &cli.format, use_color)?;
        }
        Command::Review { id, quality } => {
            commands::review::run(&app, &id, quality, &cli.format, use_color)?;
        }
        Command::Rm { id } => {
            commands::rm::run(&app, &id, &cli.format)?;
        }
        Command::Quiz(subcmd) => match subcmd {
            QuizCommand::Start { practice, limit } => {
                commands::quiz::run_start(&app, practice, limit, &cli.format)?;
            }
            QuizCommand::Answer { text } => {
                commands::quiz::run_answer(&app, &text, &cli.format)?;
            }
            QuizCommand::Skip => {
                commands::quiz::run_skip(&app, &cli.format)?;
            }
            QuizCommand::Clear => {
                commands::quiz::run_clear(&app, &cli.format)?;
            }
            QuizCommand::Adhoc {
                question,
                answer,
                source,
            } => {
                commands::quiz::run_adhoc(&app, question, answer, source, &cli.format)?;
            }
        },
    }

    Ok(())
}
