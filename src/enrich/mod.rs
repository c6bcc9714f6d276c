//! Enriching a chosen candidate into a fully-addressed location
//!
//! A `Selection` holds the candidate being enriched and moves it through
//! Idle -> Loading -> Ready/Failed. `Enricher` performs the reverse geocode
//! and exposes the whole cycle as a stream of updates.

pub mod enricher;
pub mod hierarchy;
pub mod selection;

use crate::candidate::{CandidateOrigin, LocationCandidate};
use crate::coord::Coordinate;
use hierarchy::AddressHierarchy;
use serde::{Deserialize, Serialize};

/// Where a resolved location came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// A place the user saved earlier
    UserCustom,
    /// A remote search hit
    SearchPoi,
    /// A map tap that landed on a provider POI
    GooglePoi,
    /// A bare map tap
    MapTap,
}

impl LocationSource {
    pub fn for_origin(origin: &CandidateOrigin) -> Self {
        match origin {
            CandidateOrigin::Saved { .. } => Self::UserCustom,
            CandidateOrigin::SearchPoi { .. } => Self::SearchPoi,
            CandidateOrigin::TappedPoi { place_id: Some(_) } => Self::GooglePoi,
            CandidateOrigin::TappedPoi { place_id: None } => Self::MapTap,
        }
    }
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserCustom => write!(f, "user_custom"),
            Self::SearchPoi => write!(f, "search_poi"),
            Self::GooglePoi => write!(f, "google_poi"),
            Self::MapTap => write!(f, "map_tap"),
        }
    }
}

/// Enrichment progress of the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

impl std::fmt::Display for EnrichmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A committed-ready location with its address hierarchy
///
/// Values are never edited in place; edits produce a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    /// Position before the pin was moved, if it was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_coordinate: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdivision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub source: LocationSource,
    /// Set only when reusing a saved place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_entry_id: Option<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

impl ResolvedLocation {
    /// Unenriched location carrying whatever the candidate already knows
    pub fn from_candidate(candidate: &LocationCandidate) -> Self {
        let mut resolved = Self {
            coordinate: candidate.coordinate,
            original_coordinate: None,
            name: present(&Some(candidate.name.clone())),
            address: present(&candidate.address),
            neighborhood: None,
            city: present(&candidate.city),
            subdivision: None,
            region: None,
            postal_code: None,
            country: None,
            source: LocationSource::for_origin(&candidate.origin),
            saved_entry_id: None,
        };

        if let CandidateOrigin::Saved {
            place_id,
            region,
            country,
            postal_code,
            ..
        } = &candidate.origin
        {
            resolved.saved_entry_id = Some(place_id.clone());
            resolved.region = present(region);
            resolved.country = present(country);
            resolved.postal_code = present(postal_code);
        }

        resolved
    }

    /// Copy with empty fields filled from a geocode hierarchy
    ///
    /// Fields already set are kept: stored data beats a possibly stale
    /// geocode.
    pub fn fill_from(&self, hierarchy: &AddressHierarchy) -> Self {
        fn fill(current: &Option<String>, incoming: &Option<String>) -> Option<String> {
            current.clone().or_else(|| incoming.clone())
        }

        Self {
            name: fill(&self.name, &hierarchy.name),
            address: fill(&self.address, &hierarchy.address),
            neighborhood: fill(&self.neighborhood, &hierarchy.neighborhood),
            city: fill(&self.city, &hierarchy.city),
            subdivision: fill(&self.subdivision, &hierarchy.subdivision),
            region: fill(&self.region, &hierarchy.region),
            postal_code: fill(&self.postal_code, &hierarchy.postal_code),
            country: fill(&self.country, &hierarchy.country),
            ..self.clone()
        }
    }

    /// Copy with user-edited name and/or address
    ///
    /// An edited place is no longer the saved place it came from.
    pub fn with_edits(&self, name: Option<String>, address: Option<String>) -> Self {
        let edited = name.is_some() || address.is_some();
        Self {
            name: name.map_or_else(|| self.name.clone(), |n| present(&Some(n))),
            address: address.map_or_else(|| self.address.clone(), |a| present(&Some(a))),
            saved_entry_id: if edited { None } else { self.saved_entry_id.clone() },
            source: if edited && self.source == LocationSource::UserCustom {
                LocationSource::MapTap
            } else {
                self.source
            },
            ..self.clone()
        }
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        let parts: Vec<&str> = [
            self.name.as_deref(),
            self.address.as_deref(),
            self.city.as_deref(),
            self.region.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            self.coordinate.to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Snapshot of a selection, emitted at every enrichment transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentUpdate {
    pub status: EnrichmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::source::{from_saved, from_search, from_tap};
    use crate::candidate::{RemotePoi, SavedPlace};

    fn hierarchy() -> AddressHierarchy {
        AddressHierarchy {
            name: Some("Geocoded Name".to_string()),
            address: Some("999 Other Rd".to_string()),
            neighborhood: Some("Old Town".to_string()),
            city: Some("Springfield".to_string()),
            subdivision: Some("Sangamon County".to_string()),
            region: Some("Illinois".to_string()),
            postal_code: Some("62701".to_string()),
            country: Some("United States".to_string()),
        }
    }

    #[test]
    fn test_source_mapping() {
        let point = Coordinate::new(1.0, 1.0);
        let saved = from_saved(&[SavedPlace::new("s", "Home", point)], point).remove(0);
        let search = from_search(&[RemotePoi::new("p", "Cafe", point)], Some(point), false).remove(0);
        let poi_tap = from_tap(Some(point), Some("g"), Some("Museum")).unwrap();
        let bare_tap = from_tap(Some(point), None, None).unwrap();

        assert_eq!(ResolvedLocation::from_candidate(&saved).source, LocationSource::UserCustom);
        assert_eq!(ResolvedLocation::from_candidate(&search).source, LocationSource::SearchPoi);
        assert_eq!(ResolvedLocation::from_candidate(&poi_tap).source, LocationSource::GooglePoi);
        assert_eq!(ResolvedLocation::from_candidate(&bare_tap).source, LocationSource::MapTap);
    }

    #[test]
    fn test_from_saved_candidate_carries_stored_fields() {
        let point = Coordinate::new(1.0, 1.0);
        let mut place = SavedPlace::new("s1", "Home", point).with_address("123 Main St");
        place.region = Some("Ohio".to_string());
        let candidate = from_saved(&[place], point).remove(0);

        let resolved = ResolvedLocation::from_candidate(&candidate);

        assert_eq!(resolved.saved_entry_id.as_deref(), Some("s1"));
        assert_eq!(resolved.address.as_deref(), Some("123 Main St"));
        assert_eq!(resolved.region.as_deref(), Some("Ohio"));
        assert_eq!(resolved.name.as_deref(), Some("Home"));
    }

    #[test]
    fn test_fill_only() {
        let point = Coordinate::new(1.0, 1.0);
        let candidate = from_saved(
            &[SavedPlace::new("s", "Home", point).with_address("123 Main St")],
            point,
        )
        .remove(0);

        let resolved = ResolvedLocation::from_candidate(&candidate).fill_from(&hierarchy());

        assert_eq!(resolved.name.as_deref(), Some("Home"));
        assert_eq!(resolved.address.as_deref(), Some("123 Main St"));
        assert_eq!(resolved.city.as_deref(), Some("Springfield"));
        assert_eq!(resolved.neighborhood.as_deref(), Some("Old Town"));
        assert_eq!(resolved.postal_code.as_deref(), Some("62701"));
    }

    #[test]
    fn test_unnamed_tap_gets_geocoded_name() {
        let tap = from_tap(Some(Coordinate::new(1.0, 1.0)), None, None).unwrap();
        let resolved = ResolvedLocation::from_candidate(&tap);
        assert_eq!(resolved.name, None);

        let resolved = resolved.fill_from(&hierarchy());
        assert_eq!(resolved.name.as_deref(), Some("Geocoded Name"));
    }

    #[test]
    fn test_edits_supersede() {
        let point = Coordinate::new(1.0, 1.0);
        let candidate = from_saved(&[SavedPlace::new("s", "Home", point)], point).remove(0);
        let original = ResolvedLocation::from_candidate(&candidate);

        let edited = original.with_edits(Some("Mom's".to_string()), None);

        assert_eq!(original.name.as_deref(), Some("Home"));
        assert_eq!(edited.name.as_deref(), Some("Mom's"));
        assert_eq!(edited.saved_entry_id, None);
        assert_eq!(edited.source, LocationSource::MapTap);

        let untouched = original.with_edits(None, None);
        assert_eq!(untouched, original);
    }

    #[test]
    fn test_summary() {
        let tap = from_tap(Some(Coordinate::new(1.0, 2.0)), None, None).unwrap();
        let resolved = ResolvedLocation::from_candidate(&tap);
        assert_eq!(resolved.summary(), "(1.000000, 2.000000)");

        let resolved = resolved.fill_from(&hierarchy());
        assert_eq!(
            resolved.summary(),
            "Geocoded Name, 999 Other Rd, Springfield, Illinois, United States"
        );
    }
}
