//! toolvars CLI - resolve toolchain variables for MPI and FFT components

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("toolvars=debug")
    } else {
        EnvFilter::new("toolvars=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color && std::io::stderr().is_terminal();

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, color),
        Commands::Gate(args) => commands::gate::execute(args),
        Commands::Providers(args) => commands::providers::execute(args),
    }
}
