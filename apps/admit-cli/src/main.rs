//! # admit
//!
//! Command-line front end for the goal admissibility classifier.
//!
//! - `admit classify <FILE|->` - classify a JSON/YAML goal draft
//! - `admit rules` - print the active rule table
//! - `admit fields` - list field paths and their labels

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::AdmitConfig;

/// Goal admissibility classifier CLI.
#[derive(Parser)]
#[command(name = "admit", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a goal draft.
    Classify(commands::classify::ClassifyArgs),
    /// Print the rules of a rule set.
    Rules(commands::rules::RulesArgs),
    /// List goal field paths and their labels.
    Fields,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with verdict output on stdout.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = AdmitConfig::load_or_default(&AdmitConfig::path_for(&project_root));

    match &cli.command {
        Commands::Classify(args) => commands::classify::execute(args, &config, &project_root),
        Commands::Rules(args) => commands::rules::execute(args, &config, &project_root),
        Commands::Fields => commands::fields::execute(),
    }
}
