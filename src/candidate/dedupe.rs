//! Deciding when two candidates are the same real-world place
//!
//! Names must match after normalization, and then either the addresses
//! match too or the two points are within `SAME_PLACE_METERS`. Chains with
//! the same name a few blocks apart stay separate; jittery re-geocodes of
//! one venue collapse.
//!
//! Normalization only case-folds and trims. Punctuation and diacritics are
//! compared as-is, so "Joe's" and "Joes" are different names.

use crate::candidate::LocationCandidate;
use crate::constants::matching::SAME_PLACE_METERS;
use crate::coord::distance::distance_meters;

/// Case-folded, trimmed form used for name/address comparison
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn same_text(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Whether `a` and `b` describe the same place
///
/// Blank names never match; an unnamed tap is not a duplicate of anything.
pub fn same_entity(a: &LocationCandidate, b: &LocationCandidate) -> bool {
    if a.name.trim().is_empty() || b.name.trim().is_empty() || !same_text(&a.name, &b.name) {
        return false;
    }

    if let (Some(addr_a), Some(addr_b)) = (&a.address, &b.address) {
        if same_text(addr_a, addr_b) {
            return true;
        }
    }

    distance_meters(a.coordinate, b.coordinate) < SAME_PLACE_METERS
}

/// The candidate to keep from a duplicate pair
///
/// Saved beats tapped beats search. On equal authority the first argument
/// (the one already in the list) is kept.
pub fn preferred<'a>(a: &'a LocationCandidate, b: &'a LocationCandidate) -> &'a LocationCandidate {
    if b.origin.authority() < a.origin.authority() {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::source::{from_saved, from_search, from_tap};
    use crate::candidate::{RemotePoi, SavedPlace};
    use crate::coord::Coordinate;

    fn search(name: &str, lat: f64, lng: f64, address: Option<&str>) -> LocationCandidate {
        let mut poi = RemotePoi::new(name, name, Coordinate::new(lat, lng));
        poi.address = address.map(str::to_string);
        from_search(&[poi], Some(Coordinate::new(lat, lng)), false).remove(0)
    }

    fn saved(name: &str, lat: f64, lng: f64) -> LocationCandidate {
        let coord = Coordinate::new(lat, lng);
        from_saved(&[SavedPlace::new("s", name, coord)], coord).remove(0)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Cafe X \t"), "cafe x");
        assert_eq!(normalize("JOE'S PIZZA"), "joe's pizza");
    }

    #[test]
    fn test_same_name_nearby_is_same() {
        let a = search("Cafe X", 10.0, 20.0, None);
        let b = search("cafe x ", 10.0003, 20.0003, None);
        assert!(same_entity(&a, &b));
        assert!(same_entity(&b, &a));
    }

    #[test]
    fn test_chain_far_apart_is_distinct() {
        let a = search("Joe's Pizza", 40.7128, -74.0060, None);
        // ~500 m north
        let b = search("Joe's Pizza", 40.7173, -74.0060, None);
        assert!(!same_entity(&a, &b));
    }

    #[test]
    fn test_same_address_far_apart_is_same() {
        let a = search("Cafe X", 10.0, 20.0, Some("1 St"));
        let b = search("CAFE X", 10.01, 20.01, Some(" 1 st"));
        assert!(same_entity(&a, &b));
    }

    #[test]
    fn test_different_address_far_apart_is_distinct() {
        let a = search("Cafe X", 10.0, 20.0, Some("1 St"));
        let b = search("Cafe X", 10.01, 20.01, Some("2 St"));
        assert!(!same_entity(&a, &b));
    }

    #[test]
    fn test_different_address_nearby_is_same() {
        let a = search("Cafe X", 10.0, 20.0, Some("1 St"));
        let b = search("Cafe X", 10.0001, 20.0, Some("1 Street"));
        assert!(same_entity(&a, &b));
    }

    #[test]
    fn test_different_names_never_match() {
        let a = saved("Home", 40.0, -74.0);
        let b = search("Home Depot", 40.0, -74.0, None);
        assert!(!same_entity(&a, &b));
    }

    #[test]
    fn test_punctuation_is_significant() {
        let a = search("Joe's Pizza", 10.0, 20.0, None);
        let b = search("Joes Pizza", 10.0, 20.0, None);
        assert!(!same_entity(&a, &b));
    }

    #[test]
    fn test_blank_names_never_match() {
        let tap = from_tap(Some(Coordinate::new(10.0, 20.0)), None, None).unwrap();
        let other = from_tap(Some(Coordinate::new(10.0, 20.0)), None, Some("  ")).unwrap();
        assert!(!same_entity(&tap, &other));
    }

    #[test]
    fn test_preferred_by_authority() {
        let s = saved("Cafe X", 10.0, 20.0);
        let p = search("Cafe X", 10.0, 20.0, None);
        let t = from_tap(Some(Coordinate::new(10.0, 20.0)), None, Some("Cafe X")).unwrap();

        assert_eq!(preferred(&p, &s).id, s.id);
        assert_eq!(preferred(&s, &p).id, s.id);
        assert_eq!(preferred(&p, &t).id, t.id);
        assert_eq!(preferred(&t, &s).id, s.id);

        let p2 = search("Cafe X", 10.0, 20.0, Some("x"));
        assert!(std::ptr::eq(preferred(&p, &p2), &p));
    }
}
