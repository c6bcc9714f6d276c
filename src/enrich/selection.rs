//! Picker session state and the enrichment state machine
//!
//! Each enrichment request is tagged with a ticket holding a generation
//! number and the coordinate it was issued for. A response is applied only
//! if both still match the selection; anything else is stale and dropped.

use crate::candidate::LocationCandidate;
use crate::coord::Coordinate;
use crate::enrich::hierarchy::{self, AddressHierarchy};
use crate::enrich::{EnrichmentStatus, EnrichmentUpdate, ResolvedLocation};
use crate::error::Result;
use crate::geo::GeocodeResult;
use tracing::{debug, warn};

/// Identifies one in-flight reverse geocode request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichmentTicket {
    pub generation: u64,
    pub coordinate: Coordinate,
}

/// Mutable state of one picker session
#[derive(Debug, Clone, Default)]
pub struct Selection {
    candidate: Option<LocationCandidate>,
    resolved: Option<ResolvedLocation>,
    status: EnrichmentStatus,
    generation: u64,
    error: Option<String>,
    /// Last successful geocode, reused when a candidate at the same
    /// coordinate is activated
    cached: Option<(Coordinate, AddressHierarchy)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> EnrichmentStatus {
        self.status
    }

    pub fn candidate(&self) -> Option<&LocationCandidate> {
        self.candidate.as_ref()
    }

    pub fn resolved(&self) -> Option<&ResolvedLocation> {
        self.resolved.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Coordinate of the current candidate
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.candidate.as_ref().map(|c| c.coordinate)
    }

    /// Activate a candidate
    ///
    /// Returns a ticket when a reverse geocode must be issued. Re-activating
    /// the active candidate while Loading or Ready changes nothing, edits
    /// included. A different candidate at the same coordinate takes over
    /// the cached or in-flight result without a new request.
    pub fn activate(&mut self, candidate: LocationCandidate) -> Option<EnrichmentTicket> {
        let same_point = self.coordinate() == Some(candidate.coordinate);
        let in_progress = matches!(
            self.status,
            EnrichmentStatus::Ready | EnrichmentStatus::Loading
        );

        if same_point && in_progress {
            let same_candidate = self.candidate.as_ref().map(|c| c.id.as_str()) == Some(candidate.id.as_str());
            if same_candidate {
                debug!(candidate = %candidate.id, status = %self.status, "Candidate already active, nothing to do");
                return None;
            }

            debug!(candidate = %candidate.id, status = %self.status, "Reusing enrichment for coordinate");
            let original = self.resolved.as_ref().and_then(|r| r.original_coordinate);
            let mut base = ResolvedLocation::from_candidate(&candidate);
            base.original_coordinate = original;
            self.resolved = Some(match (&self.status, &self.cached) {
                (EnrichmentStatus::Ready, Some((_, cached))) => base.fill_from(cached),
                _ => base,
            });
            self.candidate = Some(candidate);
            return None;
        }

        let coordinate = candidate.coordinate;
        self.resolved = Some(ResolvedLocation::from_candidate(&candidate));
        self.candidate = Some(candidate);
        Some(self.begin(coordinate))
    }

    /// Move the current candidate's pin
    ///
    /// Starts a fresh enrichment cycle; any request still in flight for the
    /// old position becomes stale.
    pub fn move_pin(&mut self, coordinate: Coordinate) -> Option<EnrichmentTicket> {
        let current = self.candidate.as_ref()?;
        if current.coordinate == coordinate {
            return None;
        }

        let moved = current.with_coordinate(coordinate);
        let original = self
            .resolved
            .as_ref()
            .and_then(|r| r.original_coordinate)
            .unwrap_or(current.coordinate);

        let mut resolved = ResolvedLocation::from_candidate(&moved);
        resolved.original_coordinate = Some(original);

        self.candidate = Some(moved);
        self.resolved = Some(resolved);
        self.cached = None;
        Some(self.begin(coordinate))
    }

    /// Idle -> Loading under a new generation
    fn begin(&mut self, coordinate: Coordinate) -> EnrichmentTicket {
        self.status = EnrichmentStatus::Idle;
        self.error = None;
        self.generation += 1;

        let ticket = EnrichmentTicket {
            generation: self.generation,
            coordinate,
        };
        self.status = EnrichmentStatus::Loading;
        ticket
    }

    /// Whether a ticket still describes the current request
    pub fn is_current(&self, ticket: &EnrichmentTicket) -> bool {
        self.status == EnrichmentStatus::Loading
            && ticket.generation == self.generation
            && self.coordinate() == Some(ticket.coordinate)
    }

    /// Apply a provider response
    ///
    /// Returns false when the response was stale and discarded.
    pub fn complete(&mut self, ticket: &EnrichmentTicket, result: Result<GeocodeResult>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale enrichment result"
            );
            return false;
        }

        match result {
            Ok(geocode) => {
                let parsed = hierarchy::parse(&geocode);
                self.resolved = self.resolved.as_ref().map(|r| r.fill_from(&parsed));
                self.cached = Some((ticket.coordinate, parsed));
                self.status = EnrichmentStatus::Ready;
            }
            Err(e) => {
                warn!(coordinate = %ticket.coordinate, error = %e, "Enrichment failed");
                self.error = Some(e.to_string());
                self.status = EnrichmentStatus::Failed;
            }
        }
        true
    }

    /// Replace the name and/or address with user edits
    pub fn edit(&mut self, name: Option<String>, address: Option<String>) {
        if let Some(resolved) = &self.resolved {
            self.resolved = Some(resolved.with_edits(name, address));
        }
    }

    /// Snapshot for observers
    pub fn update(&self) -> EnrichmentUpdate {
        EnrichmentUpdate {
            status: self.status,
            resolved: self.resolved.clone(),
            error: self.error.clone(),
        }
    }

    /// Finish the session with whatever is known
    ///
    /// A raw coordinate is always committable, so this succeeds in any
    /// status once a candidate has been activated.
    pub fn commit(self) -> Option<ResolvedLocation> {
        self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::source::{from_saved, from_search, from_tap};
    use crate::candidate::{RemotePoi, SavedPlace};
    use crate::error::Error;

    fn geocode(address: &str) -> GeocodeResult {
        GeocodeResult {
            name: None,
            address: Some(address.to_string()),
            components: Vec::new(),
        }
        .with_component("place", "Springfield")
    }

    fn tap(lat: f64, lng: f64) -> LocationCandidate {
        from_tap(Some(Coordinate::new(lat, lng)), None, None).unwrap()
    }

    #[test]
    fn test_happy_path() {
        let mut selection = Selection::new();
        assert_eq!(selection.status(), EnrichmentStatus::Idle);

        let ticket = selection.activate(tap(1.0, 1.0)).unwrap();
        assert_eq!(selection.status(), EnrichmentStatus::Loading);
        assert_eq!(ticket.coordinate, Coordinate::new(1.0, 1.0));

        assert!(selection.complete(&ticket, Ok(geocode("5 Elm St"))));
        assert_eq!(selection.status(), EnrichmentStatus::Ready);

        let resolved = selection.resolved().unwrap();
        assert_eq!(resolved.address.as_deref(), Some("5 Elm St"));
        assert_eq!(resolved.city.as_deref(), Some("Springfield"));
    }

    #[test]
    fn test_failure_is_still_committable() {
        let mut selection = Selection::new();
        let ticket = selection.activate(tap(1.0, 1.0)).unwrap();

        assert!(selection.complete(
            &ticket,
            Err(Error::ProviderUnavailable("timeout".to_string()))
        ));
        assert_eq!(selection.status(), EnrichmentStatus::Failed);
        assert!(selection.error().unwrap().contains("timeout"));

        let committed = selection.commit().unwrap();
        assert_eq!(committed.coordinate, Coordinate::new(1.0, 1.0));
        assert_eq!(committed.address, None);
    }

    #[test]
    fn test_fill_only_keeps_saved_address() {
        let point = Coordinate::new(40.0, -74.0);
        let saved = from_saved(
            &[SavedPlace::new("s", "Home", point).with_address("123 Main St")],
            point,
        )
        .remove(0);

        let mut selection = Selection::new();
        let ticket = selection.activate(saved).unwrap();
        selection.complete(&ticket, Ok(geocode("77 Elsewhere Ave")));

        let resolved = selection.resolved().unwrap();
        assert_eq!(resolved.address.as_deref(), Some("123 Main St"));
        assert_eq!(resolved.city.as_deref(), Some("Springfield"));
    }

    #[test]
    fn test_reactivate_ready_is_noop() {
        let mut selection = Selection::new();
        let ticket = selection.activate(tap(1.0, 1.0)).unwrap();
        selection.complete(&ticket, Ok(geocode("5 Elm St")));

        assert!(selection.activate(tap(1.0, 1.0)).is_none());
        assert_eq!(selection.status(), EnrichmentStatus::Ready);
        assert_eq!(
            selection.resolved().unwrap().address.as_deref(),
            Some("5 Elm St")
        );
    }

    #[test]
    fn test_reactivate_different_candidate_same_point_reuses_geocode() {
        let point = Coordinate::new(1.0, 1.0);
        let mut selection = Selection::new();
        let ticket = selection.activate(tap(1.0, 1.0)).unwrap();
        selection.complete(&ticket, Ok(geocode("5 Elm St")));

        let poi = from_search(&[RemotePoi::new("p", "Bakery", point)], Some(point), false).remove(0);
        assert!(selection.activate(poi).is_none());

        let resolved = selection.resolved().unwrap();
        assert_eq!(resolved.name.as_deref(), Some("Bakery"));
        assert_eq!(resolved.address.as_deref(), Some("5 Elm St"));
    }

    #[test]
    fn test_reactivate_while_loading_does_not_issue_second_request() {
        let mut selection = Selection::new();
        let ticket = selection.activate(tap(1.0, 1.0)).unwrap();

        assert!(selection.activate(tap(1.0, 1.0)).is_none());
        assert!(selection.complete(&ticket, Ok(geocode("5 Elm St"))));
        assert_eq!(selection.status(), EnrichmentStatus::Ready);
    }

    #[test]
    fn test_retry_after_failure() {
        let mut selection = Selection::new();
        let first = selection.activate(tap(1.0, 1.0)).unwrap();
        selection.complete(&first, Err(Error::ProviderUnavailable("down".to_string())));

        let second = selection.activate(tap(1.0, 1.0)).unwrap();
        assert!(second.generation > first.generation);
        assert_eq!(selection.status(), EnrichmentStatus::Loading);
        assert_eq!(selection.error(), None);
    }

    #[test]
    fn test_stale_result_after_pin_move_is_discarded() {
        let mut selection = Selection::new();
        let old = selection.activate(tap(1.0, 1.0)).unwrap();

        let new = selection.move_pin(Coordinate::new(1.001, 1.0)).unwrap();
        assert_eq!(selection.status(), EnrichmentStatus::Loading);

        assert!(!selection.complete(&old, Ok(geocode("Old Address"))));
        assert_eq!(selection.status(), EnrichmentStatus::Loading);
        assert_eq!(selection.resolved().unwrap().address, None);

        assert!(selection.complete(&new, Ok(geocode("New Address"))));
        let resolved = selection.resolved().unwrap();
        assert_eq!(resolved.address.as_deref(), Some("New Address"));
        assert_eq!(resolved.coordinate, Coordinate::new(1.001, 1.0));
        assert_eq!(resolved.original_coordinate, Some(Coordinate::new(1.0, 1.0)));
    }

    #[test]
    fn test_original_coordinate_survives_repeated_moves() {
        let mut selection = Selection::new();
        selection.activate(tap(1.0, 1.0));
        selection.move_pin(Coordinate::new(1.1, 1.0));
        selection.move_pin(Coordinate::new(1.2, 1.0));

        assert_eq!(
            selection.resolved().unwrap().original_coordinate,
            Some(Coordinate::new(1.0, 1.0))
        );
        assert!(selection.move_pin(Coordinate::new(1.2, 1.0)).is_none());
    }

    #[test]
    fn test_stale_result_after_switching_candidate() {
        let mut selection = Selection::new();
        let first = selection.activate(tap(1.0, 1.0)).unwrap();
        let second = selection.activate(tap(2.0, 2.0)).unwrap();

        assert!(!selection.complete(&first, Ok(geocode("First"))));
        assert!(selection.complete(&second, Ok(geocode("Second"))));
        assert_eq!(
            selection.resolved().unwrap().address.as_deref(),
            Some("Second")
        );
    }

    #[test]
    fn test_result_after_completion_is_ignored() {
        let mut selection = Selection::new();
        let ticket = selection.activate(tap(1.0, 1.0)).unwrap();
        assert!(selection.complete(&ticket, Ok(geocode("Once"))));
        assert!(!selection.complete(&ticket, Ok(geocode("Twice"))));
        assert_eq!(selection.resolved().unwrap().address.as_deref(), Some("Once"));
    }

    #[test]
    fn test_edit_supersedes_resolved() {
        let mut selection = Selection::new();
        let ticket = selection.activate(tap(1.0, 1.0)).unwrap();
        selection.complete(&ticket, Ok(geocode("5 Elm St")));

        selection.edit(Some("Picnic spot".to_string()), None);

        let update = selection.update();
        assert_eq!(update.status, EnrichmentStatus::Ready);
        let resolved = update.resolved.unwrap();
        assert_eq!(resolved.name.as_deref(), Some("Picnic spot"));
        assert_eq!(resolved.address.as_deref(), Some("5 Elm St"));
    }

    #[test]
    fn test_reactivate_keeps_edits() {
        let mut selection = Selection::new();
        let ticket = selection.activate(tap(1.0, 1.0)).unwrap();
        selection.complete(&ticket, Ok(geocode("5 Elm St")));
        selection.edit(Some("Picnic spot".to_string()), Some("Lawn 3".to_string()));
        let before = selection.resolved().cloned();

        assert!(selection.activate(tap(1.0, 1.0)).is_none());

        assert_eq!(selection.resolved().cloned(), before);
        assert_eq!(selection.resolved().unwrap().name.as_deref(), Some("Picnic spot"));
    }

    #[test]
    fn test_reactivate_after_move_keeps_original_coordinate() {
        let start = Coordinate::new(1.0, 1.0);
        let moved_to = Coordinate::new(1.001, 1.0);

        let mut selection = Selection::new();
        selection.activate(tap(1.0, 1.0)).unwrap();
        let ticket = selection.move_pin(moved_to).unwrap();
        assert!(selection.complete(&ticket, Ok(geocode("9 Moved Rd"))));

        let moved = selection.candidate().cloned().unwrap();
        assert!(selection.activate(moved).is_none());
        let resolved = selection.resolved().unwrap();
        assert_eq!(resolved.original_coordinate, Some(start));
        assert_eq!(resolved.address.as_deref(), Some("9 Moved Rd"));

        // Another candidate at the moved point still remembers the origin
        let poi = from_search(&[RemotePoi::new("p", "Kiosk", moved_to)], Some(moved_to), false).remove(0);
        assert!(selection.activate(poi).is_none());
        let resolved = selection.resolved().unwrap();
        assert_eq!(resolved.name.as_deref(), Some("Kiosk"));
        assert_eq!(resolved.original_coordinate, Some(start));
        assert_eq!(resolved.address.as_deref(), Some("9 Moved Rd"));
    }

    #[test]
    fn test_move_pin_without_candidate() {
        let mut selection = Selection::new();
        assert!(selection.move_pin(Coordinate::new(1.0, 1.0)).is_none());
        assert!(selection.commit().is_none());
    }
}
