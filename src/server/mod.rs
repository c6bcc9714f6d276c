//! HTTP server for place-resolver
//!
//! Provides REST API endpoints for resolution, enrichment and saved places.

pub mod routes;
pub mod state;

use crate::error::{Error, Result};
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Parse a `host:port` bind address
pub fn parse_addr(addr: &str) -> Result<SocketAddr> {
    addr.parse()
        .map_err(|e| Error::Server(format!("Invalid server address {}: {}", addr, e)))
}

/// Serve prepared state on `addr`
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addr() {
        assert_eq!(parse_addr("127.0.0.1:8080").unwrap().port(), 8080);
        assert!(matches!(parse_addr("localhost"), Err(Error::Server(_))));
    }
}
