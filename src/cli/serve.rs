//! Serve command handler
//!
//! Checks the address, provider URL and saved-place store before binding,
//! so a bad config fails at startup rather than on the first request.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::places::PlaceStore;
use crate::server::{self, state::AppState};
use clap::Args;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = Config::load()?;
    apply_overrides(&mut config, args);

    let (addr, state) = prepare(config)?;

    info!(
        "Starting place-resolver server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    server::serve(addr, Arc::new(state)).await
}

fn apply_overrides(config: &mut Config, args: ServeArgs) {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
}

/// Validate the config and load everything the server holds
fn prepare(config: Config) -> Result<(SocketAddr, AppState)> {
    let addr = server::parse_addr(&config.server_addr())?;

    let base_url = reqwest::Url::parse(&config.geocode.base_url)
        .map_err(|e| Error::Config(format!("Invalid geocode.base_url: {}", e)))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "geocode.base_url must be http or https, got {}",
            base_url.scheme()
        )));
    }

    let store = PlaceStore::load(&config.places)?;
    info!(
        path = %store.path().display(),
        saved = store.len(),
        "Loaded saved places"
    );

    let state = AppState::with_store(config, store)?;
    Ok((addr, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.places.path = Some(dir.path().join("places.json").to_string_lossy().into_owned());
        config
    }

    #[test]
    fn test_overrides_replace_host_and_port() {
        let mut config = Config::default();
        let default_host = config.server.host.clone();

        apply_overrides(&mut config, ServeArgs { host: None, port: Some(9999) });
        assert_eq!(config.server.host, default_host);
        assert_eq!(config.server.port, 9999);

        apply_overrides(&mut config, ServeArgs { host: Some("0.0.0.0".to_string()), port: None });
        assert_eq!(config.server_addr(), "0.0.0.0:9999");
    }

    #[test]
    fn test_prepare_loads_store() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("places.json"),
            r#"[{"id":"h","name":"Home","coordinate":{"latitude":1.0,"longitude":2.0}}]"#,
        )
        .unwrap();

        let (addr, state) = prepare(test_config(&dir)).unwrap();

        assert_eq!(addr.port(), Config::default().server.port);
        assert_eq!(state.places.blocking_read().len(), 1);
    }

    #[test]
    fn test_prepare_rejects_corrupt_store() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("places.json"), "not json").unwrap();

        assert!(prepare(test_config(&dir)).is_err());
    }

    #[test]
    fn test_prepare_rejects_bad_address_and_url() {
        let dir = TempDir::new().unwrap();

        let mut config = test_config(&dir);
        config.server.host = "not a host".to_string();
        assert!(matches!(prepare(config), Err(Error::Server(_))));

        let mut config = test_config(&dir);
        config.geocode.base_url = "nominatim".to_string();
        assert!(matches!(prepare(config), Err(Error::Config(_))));

        let mut config = test_config(&dir);
        config.geocode.base_url = "ftp://example.com".to_string();
        assert!(matches!(prepare(config), Err(Error::Config(_))));
    }
}
