//! Server shared state
//!
//! Holds configuration and shared resources for the HTTP server.

use crate::config::Config;
use crate::coord::zoom::{ZoomCycle, ZoomLevel};
use crate::enrich::enricher::Enricher;
use crate::error::Result;
use crate::geo::get_provider;
use crate::geo::nominatim::NominatimBackend;
use crate::places::PlaceStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// Search and reverse geocoding provider
    provider: Arc<NominatimBackend>,

    /// Saved places, persisted after every change
    pub places: RwLock<PlaceStore>,

    /// Zoom cycle per client session
    zoom: RwLock<HashMap<String, ZoomCycle>>,
}

impl AppState {
    /// Create application state around an already-loaded store
    pub fn with_store(config: Config, store: PlaceStore) -> Result<Self> {
        let provider = Arc::new(get_provider(&config.geocode)?);
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            provider,
            places: RwLock::new(store),
            zoom: RwLock::new(HashMap::new()),
        })
    }

    /// Get the search/geocode provider
    pub fn provider(&self) -> &NominatimBackend {
        &self.provider
    }

    /// Enricher over the shared provider, bounded by the configured timeout
    pub async fn enricher(&self) -> Enricher<Arc<NominatimBackend>> {
        let timeout = self.config.read().await.geocode.timeout();
        Enricher::new(Arc::clone(&self.provider)).with_timeout(timeout)
    }

    /// Advance the zoom cycle of one session
    ///
    /// Sessions are independent: activating a candidate in one never resets
    /// another session's cycle.
    pub async fn activate_zoom(&self, session: &str, candidate_id: &str) -> ZoomLevel {
        self.zoom
            .write()
            .await
            .entry(session.to_string())
            .or_default()
            .activate(candidate_id)
    }
}
