//! Great-circle distance between coordinates

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::coord::Coordinate;

/// Calculate the distance between two points in meters (Haversine formula)
///
/// NaN inputs propagate to a NaN result; validate coordinates first if that
/// matters to the caller.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_degree_latitude() {
        let nyc = Coordinate::new(40.7128, -74.0060);
        let north = Coordinate::new(41.7128, -74.0060);

        let distance = distance_meters(nyc, north);
        assert!(
            (distance - 111_195.0).abs() < 100.0,
            "Distance {} should be approximately 111195",
            distance
        );
    }

    #[test]
    fn test_identity() {
        let points = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(40.0, -74.0),
            Coordinate::new(-89.9, 179.9),
        ];
        for p in points {
            assert_eq!(distance_meters(p, p), 0.0);
        }
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (Coordinate::new(40.0, -74.0), Coordinate::new(40.0001, -74.0001)),
            (Coordinate::new(10.0, 20.0), Coordinate::new(-33.8, 151.2)),
            (Coordinate::new(89.0, 0.0), Coordinate::new(-89.0, 180.0)),
            (Coordinate::new(0.0, -179.9), Coordinate::new(0.0, 179.9)),
        ];
        for (a, b) in pairs {
            assert_relative_eq!(distance_meters(a, b), distance_meters(b, a), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_antimeridian_is_short() {
        let west = Coordinate::new(0.0, -179.9);
        let east = Coordinate::new(0.0, 179.9);
        assert!(distance_meters(west, east) < 25_000.0);
    }

    #[test]
    fn test_antipodal_is_finite() {
        let d = distance_meters(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!(d.is_finite());
        assert_relative_eq!(d, std::f64::consts::PI * EARTH_RADIUS_METERS, epsilon = 1.0);
    }

    #[test]
    fn test_nan_propagates() {
        let d = distance_meters(Coordinate::new(f64::NAN, 0.0), Coordinate::new(0.0, 0.0));
        assert!(d.is_nan());
    }
}
