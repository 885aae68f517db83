//! Distance math and geocoding candidate types.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One geocoding candidate: a place name, its full address, and where it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
}

impl Place {
    /// The composite location label stored on events picked from a
    /// suggestion, e.g. "Library (5 Main St, Springfield)".
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.address)
    }
}

/// Great-circle distance between two coordinates in kilometers (haversine).
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Human-readable distance label.
///
/// Under a kilometer the label is in whole meters, under ten kilometers
/// with one decimal, and from ten kilometers up in whole kilometers.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m away", (km * 1000.0).round() as i64)
    } else if km < 10.0 {
        format!("{:.1}km away", km)
    } else {
        format!("{}km away", km as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- distance_km ---

    #[test]
    fn zero_distance_for_same_point() {
        let p = Coordinates { latitude: 47.6, longitude: -122.3 };
        assert!(distance_km(p, p) < 1e-9);
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let a = Coordinates { latitude: 0.0, longitude: 0.0 };
        let b = Coordinates { latitude: 0.0, longitude: 1.0 };
        let d = distance_km(a, b);
        assert!((d - 111.19).abs() < 0.1, "got {}", d);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates { latitude: 52.52, longitude: 13.40 };
        let b = Coordinates { latitude: 48.86, longitude: 2.35 };
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    // --- format_distance ---

    #[test]
    fn sub_kilometer_distances_are_in_meters() {
        assert_eq!(format_distance(0.45), "450m away");
        assert_eq!(format_distance(0.0), "0m away");
        assert_eq!(format_distance(0.999), "999m away");
    }

    #[test]
    fn short_distances_keep_one_decimal() {
        assert_eq!(format_distance(3.2), "3.2km away");
        assert_eq!(format_distance(1.0), "1.0km away");
        assert_eq!(format_distance(9.94), "9.9km away");
    }

    #[test]
    fn long_distances_are_whole_kilometers() {
        assert_eq!(format_distance(15.7), "15km away");
        assert_eq!(format_distance(10.0), "10km away");
    }

    // --- Place ---

    #[test]
    fn place_label_is_the_composite_form() {
        let place = Place {
            name: "Library".to_string(),
            address: "5 Main St, Springfield".to_string(),
            coordinates: Coordinates { latitude: 1.0, longitude: 2.0 },
        };
        assert_eq!(place.label(), "Library (5 Main St, Springfield)");
    }
}
