//! Location candidates and the inputs they are built from
//!
//! Every candidate carries its origin as a tagged variant, so consumers
//! match on `CandidateOrigin` instead of probing optional fields.

pub mod dedupe;
pub mod merge;
pub mod resolver;
pub mod source;

use crate::coord::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A place the user saved earlier, as read from the saved-place store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlace {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Number of entries already attached to this place
    #[serde(default)]
    pub entry_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SavedPlace {
    /// Create a saved place with only the required fields
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            address: None,
            city: None,
            region: None,
            country: None,
            postal_code: None,
            entry_count: 0,
            created_at: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_entry_count(mut self, entry_count: u32) -> Self {
        self.entry_count = entry_count;
        self
    }
}

/// A point of interest returned by a remote search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePoi {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Distance computed by the provider, if it reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
}

impl RemotePoi {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            address: None,
            category: None,
            distance_meters: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_distance(mut self, distance_meters: f64) -> Self {
        self.distance_meters = Some(distance_meters);
        self
    }
}

/// A point the user tapped on the map that has not been committed yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTap {
    pub coordinate: Coordinate,
    /// Provider place id when the tap landed on a map POI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PendingTap {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            place_id: None,
            name: None,
        }
    }

    pub fn with_place(mut self, place_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.place_id = Some(place_id.into());
        self.name = Some(name.into());
        self
    }
}

/// Where a candidate came from, with the data only that source carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateOrigin {
    Saved {
        place_id: String,
        entry_count: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        country: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        postal_code: Option<String>,
    },
    SearchPoi {
        poi_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },
    TappedPoi {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        place_id: Option<String>,
    },
}

impl CandidateOrigin {
    /// Lower ranks win when two candidates describe the same place
    pub fn authority(&self) -> u8 {
        match self {
            Self::Saved { .. } => 0,
            Self::TappedPoi { .. } => 1,
            Self::SearchPoi { .. } => 2,
        }
    }

    /// Short label used in ids and text output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saved { .. } => "saved",
            Self::SearchPoi { .. } => "search",
            Self::TappedPoi { .. } => "tap",
        }
    }
}

/// A not-yet-committed location option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    /// Origin label plus source id; stable within one resolution pass
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Distance from the pass's reference point
    pub distance_meters: f64,
    pub origin: CandidateOrigin,
}

impl LocationCandidate {
    /// Entry count, only present for saved places
    pub fn saved_entry_count(&self) -> Option<u32> {
        match &self.origin {
            CandidateOrigin::Saved { entry_count, .. } => Some(*entry_count),
            _ => None,
        }
    }

    /// Category, only present for search hits
    pub fn category(&self) -> Option<&str> {
        match &self.origin {
            CandidateOrigin::SearchPoi { category, .. } => category.as_deref(),
            _ => None,
        }
    }

    /// Copy of this candidate with a different distance
    pub fn with_distance(&self, distance_meters: f64) -> Self {
        Self {
            distance_meters,
            ..self.clone()
        }
    }

    /// Copy of this candidate moved to a new coordinate
    pub fn with_coordinate(&self, coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            ..self.clone()
        }
    }

    /// Name for display, falling back for unnamed map taps
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Dropped pin"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::source::{from_saved, from_search, from_tap};

    #[test]
    fn test_origin_specific_fields() {
        let reference = Coordinate::new(0.0, 0.0);
        let saved = from_saved(
            &[SavedPlace::new("1", "Home", reference).with_entry_count(4)],
            reference,
        );
        assert_eq!(saved[0].saved_entry_count(), Some(4));
        assert_eq!(saved[0].category(), None);

        let search = from_search(
            &[RemotePoi::new("p", "Cafe", reference).with_category("cafe")],
            Some(reference),
            false,
        );
        assert_eq!(search[0].category(), Some("cafe"));
        assert_eq!(search[0].saved_entry_count(), None);
    }

    #[test]
    fn test_authority_order() {
        let saved = CandidateOrigin::Saved {
            place_id: "1".to_string(),
            entry_count: 0,
            region: None,
            country: None,
            postal_code: None,
        };
        let tap = CandidateOrigin::TappedPoi { place_id: None };
        let search = CandidateOrigin::SearchPoi {
            poi_id: "p".to_string(),
            category: None,
        };
        assert!(saved.authority() < tap.authority());
        assert!(tap.authority() < search.authority());
    }

    #[test]
    fn test_display_name_for_unnamed_tap() {
        let tap = from_tap(Some(Coordinate::new(10.0, 20.0)), None, None).unwrap();
        assert_eq!(tap.display_name(), "Dropped pin");
    }

    #[test]
    fn test_candidate_serialization_tags_origin() {
        let tap = from_tap(Some(Coordinate::new(10.0, 20.0)), Some("g1"), Some("Museum")).unwrap();
        let json = serde_json::to_value(&tap).unwrap();
        assert_eq!(json["origin"]["kind"], "tapped_poi");
        assert_eq!(json["origin"]["place_id"], "g1");

        let parsed: LocationCandidate = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, tap);
    }
}
