//! place-resolver CLI entry point
//!
//! Resolves map viewports and taps into ranked places - CLI + web API

use place_resolver::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
