//! Resolution entry points
//!
//! `resolve` is the pure form: the caller hands over everything it already
//! has. `Resolver` runs the full flow against live providers: viewport ->
//! radius -> search -> adapters -> merge.

use crate::candidate::merge::merge;
use crate::candidate::source::{from_saved, from_search, from_tap};
use crate::candidate::{LocationCandidate, PendingTap, RemotePoi, SavedPlace};
use crate::constants::search::DEFAULT_LIMIT;
use crate::coord::radius::RadiusPolicy;
use crate::coord::{Coordinate, Viewport};
use crate::error::Result;
use crate::geo::SearchProvider;
use crate::places::SavedPlaceStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Build the ranked candidate list from already-fetched inputs
///
/// Distances are measured from the pending tap when there is one, otherwise
/// from the viewport center. Provider distances are trusted only while no
/// live query is active.
pub fn resolve(
    viewport: &Viewport,
    search_query: Option<&str>,
    tap: Option<&PendingTap>,
    saved_places: &[SavedPlace],
    search_results: &[RemotePoi],
) -> Vec<LocationCandidate> {
    let tapped = tap.and_then(|tap| {
        from_tap(
            Some(tap.coordinate),
            tap.place_id.as_deref(),
            tap.name.as_deref(),
        )
    });
    let reference = reference_point(viewport, tapped.as_ref());
    let live_query = search_query.is_some_and(|q| !q.trim().is_empty());

    let saved = from_saved(saved_places, reference);
    let search = from_search(search_results, Some(reference), !live_query);

    merge(tapped, saved, search)
}

fn reference_point(viewport: &Viewport, tapped: Option<&LocationCandidate>) -> Coordinate {
    tapped.map_or(viewport.center, |c| c.coordinate)
}

/// Output of one live resolution pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Unique ID for this pass
    pub id: String,
    /// When this pass ran (RFC 3339)
    pub generated_at: String,
    pub viewport: Viewport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Radius the search provider was asked to cover
    pub radius_meters: f64,
    /// True when the search provider failed and only saved places were used
    #[serde(default)]
    pub search_degraded: bool,
    pub candidates: Vec<LocationCandidate>,
}

/// Runs resolution passes against a search provider and a saved-place store
pub struct Resolver<'a, S, P: ?Sized> {
    search: &'a S,
    places: &'a P,
    radius_policy: RadiusPolicy,
    limit: u32,
}

impl<'a, S, P> Resolver<'a, S, P>
where
    S: SearchProvider,
    P: SavedPlaceStore + ?Sized,
{
    pub fn new(search: &'a S, places: &'a P) -> Self {
        Self {
            search,
            places,
            radius_policy: RadiusPolicy::default(),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_radius_policy(mut self, radius_policy: RadiusPolicy) -> Self {
        self.radius_policy = radius_policy;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Run one pass
    ///
    /// Only an invalid viewport is an error. Store and search failures are
    /// logged and degrade to whatever data is still available.
    pub async fn resolve(
        &self,
        viewport: &Viewport,
        query: Option<&str>,
        tap: Option<&PendingTap>,
    ) -> Result<ResolutionReport> {
        viewport.validate()?;

        let radius = self.radius_policy.radius_meters(viewport);
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        let saved_places = self.places.list_saved_places().unwrap_or_else(|e| {
            warn!(error = %e, "Saved places unavailable, continuing without them");
            Vec::new()
        });

        let (search_results, search_degraded) = match self
            .search
            .search(viewport.center, radius, query, self.limit)
            .await
        {
            Ok(results) => (results, false),
            Err(e) => {
                warn!(error = %e, "Search provider failed, showing saved places only");
                (Vec::new(), true)
            }
        };

        debug!(
            saved = saved_places.len(),
            search = search_results.len(),
            radius,
            "Merging candidate sources"
        );

        let candidates = resolve(viewport, query, tap, &saved_places, &search_results);

        Ok(ResolutionReport {
            id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            viewport: *viewport,
            query: query.map(str::to_string),
            radius_meters: radius,
            search_degraded,
            candidates,
        })
    }
}
