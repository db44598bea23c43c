//! quizclock CLI: timed trivia quiz in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "quizclock=warn";

#[derive(Parser)]
#[command(name = "quizclock", version, about = "Timed trivia quiz in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a 15-question quiz against a 30-minute clock
    Play {
        /// Participant email (prompted for when omitted)
        #[arg(long)]
        participant: Option<String>,

        /// Load questions from a local JSON file instead of the configured source
        #[arg(long)]
        questions_file: Option<PathBuf>,

        /// Seed for answer shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for saved reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats to save: none, json, html, all
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fetch a question set and save it as JSON
    Fetch {
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a saved report
    Show {
        /// Report JSON file
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, markdown, html, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter quizclock.toml
    Init,
}

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            participant,
            questions_file,
            seed,
            output,
            format,
            config,
        } => commands::play::execute(participant, questions_file, seed, output, format, config).await,
        Commands::Fetch { output, config } => commands::fetch::execute(output, config).await,
        Commands::Show { report, format } => commands::show::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
