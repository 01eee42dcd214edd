//! Unpack CLI - command-line utility for safe archive extraction.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Extract(args) => commands::extract::execute(args, &*formatter, cli.quiet),
        cli::Commands::Resolve(args) => commands::resolve::execute(args, &*formatter),
    }
}
