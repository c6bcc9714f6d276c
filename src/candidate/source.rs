//! Source adapters
//!
//! Normalize saved places, search hits and map taps into
//! `LocationCandidate`s. Adapters never fail: an item with an invalid
//! coordinate is dropped with a warning so one bad hit cannot abort a pass.

use crate::candidate::{CandidateOrigin, LocationCandidate, RemotePoi, SavedPlace};
use crate::coord::distance::distance_meters;
use crate::coord::Coordinate;
use tracing::warn;

/// Distance used when a search hit has neither a provider distance nor a
/// reference point to measure from. Sorts after every real distance.
pub const UNKNOWN_DISTANCE: f64 = f64::MAX;

/// Candidates for saved places, measured from `reference`
pub fn from_saved(saved_places: &[SavedPlace], reference: Coordinate) -> Vec<LocationCandidate> {
    saved_places
        .iter()
        .filter(|place| accept(&place.coordinate, "saved place", &place.id))
        .map(|place| LocationCandidate {
            id: format!("saved:{}", place.id),
            name: place.name.clone(),
            coordinate: place.coordinate,
            address: place.address.clone(),
            city: place.city.clone(),
            distance_meters: distance_meters(reference, place.coordinate),
            origin: CandidateOrigin::Saved {
                place_id: place.id.clone(),
                entry_count: place.entry_count,
                region: place.region.clone(),
                country: place.country.clone(),
                postal_code: place.postal_code.clone(),
            },
        })
        .collect()
}

/// Candidates for search hits
///
/// With `precomputed_distance` set, a usable provider distance is trusted
/// as-is. Otherwise (the user is re-centering with a live query) the
/// distance is measured from `reference`.
pub fn from_search(
    pois: &[RemotePoi],
    reference: Option<Coordinate>,
    precomputed_distance: bool,
) -> Vec<LocationCandidate> {
    pois.iter()
        .filter(|poi| accept(&poi.coordinate, "search result", &poi.id))
        .map(|poi| {
            let provided = poi.distance_meters.filter(|d| d.is_finite() && *d >= 0.0);
            let distance = match (provided, reference) {
                (Some(d), _) if precomputed_distance => d,
                (_, Some(reference)) => distance_meters(reference, poi.coordinate),
                (Some(d), None) => d,
                (None, None) => UNKNOWN_DISTANCE,
            };

            LocationCandidate {
                id: format!("search:{}", poi.id),
                name: poi.name.clone(),
                coordinate: poi.coordinate,
                address: poi.address.clone(),
                city: None,
                distance_meters: distance,
                origin: CandidateOrigin::SearchPoi {
                    poi_id: poi.id.clone(),
                    category: poi.category.clone(),
                },
            }
        })
        .collect()
}

/// Candidate for a pending map tap, if there is one
///
/// The tap defines the reference point, so its distance is always zero.
pub fn from_tap(
    point: Option<Coordinate>,
    place_id: Option<&str>,
    name: Option<&str>,
) -> Option<LocationCandidate> {
    let point = point?;
    let id = match place_id {
        Some(place_id) => format!("tap:{}", place_id),
        None => format!("tap:{:.6},{:.6}", point.latitude, point.longitude),
    };
    if !accept(&point, "map tap", &id) {
        return None;
    }

    Some(LocationCandidate {
        id,
        name: name.unwrap_or_default().to_string(),
        coordinate: point,
        address: None,
        city: None,
        distance_meters: 0.0,
        origin: CandidateOrigin::TappedPoi {
            place_id: place_id.map(str::to_string),
        },
    })
}

fn accept(coordinate: &Coordinate, kind: &str, id: &str) -> bool {
    match coordinate.validate() {
        Ok(()) => true,
        Err(e) => {
            warn!(kind, id, error = %e, "Dropping candidate with invalid coordinate");
            false
        }
    }
}
