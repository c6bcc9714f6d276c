//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod enrich;
pub mod places;
pub mod resolve;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Resolve map viewports and taps into ranked, enriched places
#[derive(Parser)]
#[command(name = "place-resolver")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank candidate places for a viewport
    Resolve(resolve::ResolveArgs),

    /// Reverse geocode a point into a full address
    Enrich(enrich::EnrichArgs),

    /// Manage saved places
    Places(places::PlacesArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(default_filter);

    match cli.command {
        Commands::Resolve(args) => resolve::run(args).await,
        Commands::Enrich(args) => enrich::run(args).await,
        Commands::Places(args) => places::run(args),
        Commands::Config(args) => config::run(args),
        Commands::Serve(args) => serve::run(args).await,
    }
}

/// Initialize logging to stderr, honoring RUST_LOG
fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
