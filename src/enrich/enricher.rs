//! Driving enrichment against a reverse geocoder
//!
//! The geocode request is the only suspension point. The caller owns the
//! `Selection`; `fetch` borrows nothing from it, so pin moves can happen
//! while a request is in flight and the ticket check sorts out staleness.

use crate::candidate::LocationCandidate;
use crate::enrich::selection::{EnrichmentTicket, Selection};
use crate::enrich::{EnrichmentStatus, EnrichmentUpdate};
use crate::error::{Error, Result};
use crate::geo::{GeocodeResult, ReverseGeocoder};
use futures::stream::{self, Stream, StreamExt};
use std::time::Duration;

/// Reverse geocodes tickets, optionally bounded by a timeout
pub struct Enricher<G> {
    geocoder: G,
    timeout: Option<Duration>,
}

impl<G: ReverseGeocoder> Enricher<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            timeout: None,
        }
    }

    /// Treat a provider that has not answered within `timeout` as failed
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Issue the reverse geocode for a ticket
    pub async fn fetch(&self, ticket: &EnrichmentTicket) -> Result<GeocodeResult> {
        let request = self.geocoder.reverse_geocode(ticket.coordinate);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request).await.map_err(|_| {
                Error::ProviderUnavailable(format!(
                    "Reverse geocode timed out after {}ms",
                    limit.as_millis()
                ))
            })?,
            None => request.await,
        }
    }

    /// Fetch and apply a ticket to `selection`, returning the new status
    pub async fn run(&self, selection: &mut Selection, ticket: EnrichmentTicket) -> EnrichmentStatus {
        let result = self.fetch(&ticket).await;
        selection.complete(&ticket, result);
        selection.status()
    }

    /// Enrich one candidate, yielding an update per transition
    ///
    /// The stream yields `Loading` and then `Ready` or `Failed`. Dropping it
    /// early abandons the request.
    pub fn enrich(
        &self,
        candidate: LocationCandidate,
    ) -> impl Stream<Item = EnrichmentUpdate> + Send + '_ {
        let mut selection = Selection::new();
        let ticket = selection.activate(candidate);
        let loading = selection.update();

        stream::iter([loading]).chain(stream::once(async move {
            if let Some(ticket) = ticket {
                self.run(&mut selection, ticket).await;
            }
            selection.update()
        }))
    }
}
