//! quizkit CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizkit",
    version,
    about = "Take generated multiple-choice quizzes in the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a quiz text file and report problems
    Validate {
        /// Path to the generated quiz text
        #[arg(long)]
        input: PathBuf,

        /// Print the parsed quiz as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take a quiz interactively
    Take {
        /// Path to the generated quiz text
        #[arg(long)]
        input: PathBuf,

        /// Output directory for the attempt report (defaults to the config's output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats: json, html, markdown, all (defaults to the config)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a saved attempt report
    Review {
        /// Attempt report JSON
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizkit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            input,
            json,
            config,
        } => commands::validate::execute(input, json, config),
        Commands::Take {
            input,
            output,
            format,
            config,
        } => commands::take::execute(input, output, format, config),
        Commands::Review { report, format } => commands::review::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
