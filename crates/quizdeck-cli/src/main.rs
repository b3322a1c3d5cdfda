//! quizdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizdeck", version, about = "Timed multiple-choice quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a question bank and run a timed quiz
    Run {
        /// Subject to quiz on (defaults to the last selection)
        #[arg(long)]
        subject: Option<String>,

        /// Partition (sheet tab) override; normally derived from the subject
        #[arg(long)]
        partition: Option<String>,

        /// Seed for the question/choice shuffle (reproducible runs)
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Review the last completed quiz
    Review {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a local question CSV file
    Validate {
        /// Path to the CSV file
        #[arg(long)]
        file: PathBuf,
    },

    /// List configured subjects
    Subjects {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            subject,
            partition,
            seed,
            config,
        } => commands::run::execute(subject, partition, seed, config).await,
        Commands::Review { config } => commands::review::execute(config),
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Subjects { config } => commands::subjects::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
