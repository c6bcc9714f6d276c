//! Parsing a reverse-geocode response into address fields
//!
//! Only the levels the engine stores are extracted. When a level appears
//! more than once, the first occurrence wins.

use crate::geo::GeocodeResult;
use serde::{Deserialize, Serialize};

/// Address fields extracted from a geocode response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressHierarchy {
    pub name: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub subdivision: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

fn clean(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Extract the address hierarchy from a geocode result
///
/// `place` maps to city, falling back to `locality`. When both exist the
/// locality is the finer area and fills `neighborhood` if nothing more
/// specific did. `district` maps to `subdivision`.
pub fn parse(result: &GeocodeResult) -> AddressHierarchy {
    let component = |kind: &str| {
        result
            .components
            .iter()
            .filter(|c| c.kind.eq_ignore_ascii_case(kind))
            .find_map(|c| clean(&c.text))
    };

    let place = component("place");
    let locality = component("locality");

    let (city, neighborhood) = match (place, locality) {
        (Some(place), locality) => (Some(place), component("neighborhood").or(locality)),
        (None, locality) => (locality, component("neighborhood")),
    };

    AddressHierarchy {
        name: result.name.as_deref().and_then(clean),
        address: result
            .address
            .as_deref()
            .and_then(clean)
            .or_else(|| component("address")),
        neighborhood,
        city,
        subdivision: component("district"),
        region: component("region"),
        postal_code: component("postcode"),
        country: component("country"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_hierarchy() {
        let result = GeocodeResult {
            name: Some("City Hall".to_string()),
            address: Some("260 Broadway".to_string()),
            components: Vec::new(),
        }
        .with_component("country", "United States")
        .with_component("region", "New York")
        .with_component("district", "New York County")
        .with_component("place", "New York")
        .with_component("locality", "Manhattan")
        .with_component("neighborhood", "Civic Center")
        .with_component("postcode", "10007");

        let parsed = parse(&result);

        assert_eq!(parsed.name.as_deref(), Some("City Hall"));
        assert_eq!(parsed.address.as_deref(), Some("260 Broadway"));
        assert_eq!(parsed.country.as_deref(), Some("United States"));
        assert_eq!(parsed.region.as_deref(), Some("New York"));
        assert_eq!(parsed.subdivision.as_deref(), Some("New York County"));
        assert_eq!(parsed.city.as_deref(), Some("New York"));
        assert_eq!(parsed.neighborhood.as_deref(), Some("Civic Center"));
        assert_eq!(parsed.postal_code.as_deref(), Some("10007"));
    }

    #[test]
    fn test_locality_fallbacks() {
        let locality_only = GeocodeResult::default().with_component("locality", "Brooklyn");
        let parsed = parse(&locality_only);
        assert_eq!(parsed.city.as_deref(), Some("Brooklyn"));
        assert_eq!(parsed.neighborhood, None);

        let place_and_locality = GeocodeResult::default()
            .with_component("place", "New York")
            .with_component("locality", "Brooklyn");
        let parsed = parse(&place_and_locality);
        assert_eq!(parsed.city.as_deref(), Some("New York"));
        assert_eq!(parsed.neighborhood.as_deref(), Some("Brooklyn"));
    }

    #[test]
    fn test_ignores_unknown_and_blank() {
        let result = GeocodeResult {
            name: Some("   ".to_string()),
            address: None,
            components: Vec::new(),
        }
        .with_component("poi.landmark", "Statue")
        .with_component("country", " ")
        .with_component("COUNTRY", "France")
        .with_component("address", "1 Rue de Rivoli");

        let parsed = parse(&result);

        assert_eq!(parsed.name, None);
        assert_eq!(parsed.country.as_deref(), Some("France"));
        assert_eq!(parsed.address.as_deref(), Some("1 Rue de Rivoli"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let result = GeocodeResult::default()
            .with_component("region", "First")
            .with_component("region", "Second");
        assert_eq!(parse(&result).region.as_deref(), Some("First"));
    }

    #[test]
    fn test_empty_result() {
        assert_eq!(parse(&GeocodeResult::default()), AddressHierarchy::default());
    }
}
