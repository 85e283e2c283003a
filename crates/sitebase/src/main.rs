//! sitebase CLI - Site configuration resolver.
//!
//! Provides commands for:
//! - `show`: Print every configuration key with its value and origin
//! - `get`: Print a single configuration value
//! - `url`: Build an absolute URL from a relative part

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GetArgs, ShowArgs, UrlArgs};
use output::Output;

/// sitebase - Site configuration resolver.
#[derive(Parser)]
#[command(name = "sitebase", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved configuration.
    Show(ShowArgs),
    /// Print one configuration value.
    Get(GetArgs),
    /// Build an absolute URL from a relative part.
    Url(UrlArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Show(args) => args.site.verbose,
            Self::Get(args) => args.site.verbose,
            Self::Url(args) => args.site.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Show(args) => args.execute(&output),
        Commands::Get(args) => args.execute(&output),
        Commands::Url(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
