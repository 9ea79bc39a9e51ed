//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// toolvars - toolchain variable resolution for MPI and FFT components
#[derive(Parser)]
#[command(name = "toolvars")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the build variables for a component
    Resolve(ResolveArgs),

    /// Show which behavior variant a version selects
    Gate(GateArgs),

    /// List the supported providers
    Providers(ProvidersArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Toolchain file to read (defaults to the global and project files)
    #[arg(long, env = "TOOLVARS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Component provider (e.g. openmpi, intel-fftw)
    #[arg(long)]
    pub provider: Option<String>,

    /// Component version
    #[arg(long = "version")]
    pub component_version: Option<String>,

    /// Installation root (defaults to the provider's EBROOT* variable)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Set a toolchain option (usempi, pic, static)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub set: Vec<(String, String)>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct GateArgs {
    /// Component provider
    #[arg(long)]
    pub provider: String,

    /// Component version
    #[arg(long = "version")]
    pub component_version: String,
}

#[derive(Args)]
pub struct ProvidersArgs {}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}
