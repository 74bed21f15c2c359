//! adaptquiz CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "adaptquiz", version, about = "Adaptive-difficulty terminal quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz interactively on the terminal
    ///
    /// Answer with a choice number or the answer text. Input that matches a
    /// choice exactly is taken as that choice, even when it is a number. An
    /// empty line or end of input quits.
    Play {
        /// Path to a .toml/.json question set or directory
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Player name
        #[arg(long)]
        user: Option<String>,

        /// Number of sessions to play
        #[arg(long)]
        rounds: Option<u32>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Directory to write per-session JSON summaries into
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Play a quiz with a scripted answering strategy
    Simulate {
        /// Path to a .toml/.json question set or directory
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Answering strategy: correct, wrong, alternate
        #[arg(long, default_value = "correct")]
        strategy: String,

        /// Player name
        #[arg(long)]
        user: Option<String>,

        /// Number of sessions to play
        #[arg(long)]
        rounds: Option<u32>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Directory to write per-session JSON summaries into
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question set files
    Validate {
        /// Path to question set file or directory
        #[arg(long)]
        questions: PathBuf,
    },

    /// Create starter config and example question set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("adaptquiz=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            questions,
            user,
            rounds,
            format,
            output,
            config,
        } => commands::play::execute(commands::RoundOptions {
            questions,
            user,
            rounds,
            format,
            output,
            config,
        }),
        Commands::Simulate {
            questions,
            strategy,
            user,
            rounds,
            format,
            output,
            config,
        } => commands::simulate::execute(
            strategy,
            commands::RoundOptions {
                questions,
                user,
                rounds,
                format,
                output,
                config,
            },
        ),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
