//! Bruv CLI - compare two branches across many remote git repositories

mod commands;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::CompareArgs;

/// Compare a source and a destination branch across many git repositories
#[derive(Parser, Debug)]
#[command(name = "bruv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    compare: CompareArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Logs go to stderr so stdout only carries the report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli.compare.execute()
}
