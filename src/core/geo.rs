use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used for the haversine distance
const EARTH_RADIUS: f64 = 6_371_008.8;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Calculates the distance to another LatLng using the Haversine formula
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A position inside the calibrated map, expressed in the affine basis spanned
/// by the map edges.
///
/// `u` runs from the up-left corner towards the down-left corner (image rows),
/// `v` runs from the up-left corner towards the up-right corner (image columns).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub u: f64,
    pub v: f64,
}

impl NormalizedPoint {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Strict containment in the open unit square.
    ///
    /// Points lying exactly on an edge count as off-map.
    pub fn is_on_map(&self) -> bool {
        0.0 < self.u && self.u < 1.0 && 0.0 < self.v && self.v < 1.0
    }

    pub fn distance_to(&self, other: &NormalizedPoint) -> f64 {
        let du = self.u - other.u;
        let dv = self.v - other.v;
        (du * du + dv * dv).sqrt()
    }
}

/// Integer pixel position on a raster, top-left origin.
///
/// Signed because a marker anchored near the top or left edge starts
/// outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(60.21662, 29.75197);
        assert_eq!(coord.lat, 60.21662);
        assert_eq!(coord.lng, 29.75197);
        assert!(coord.is_valid());
        assert!(coord.is_finite());
        assert!(!LatLng::new(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_lat_lng_distance() {
        // Roughly the west edge of the default calibration
        let up_left = LatLng::new(60.227471, 29.726933);
        let down_left = LatLng::new(60.208120, 29.719854);
        let distance = up_left.distance_to(&down_left);

        assert!((distance - 2_200.0).abs() < 100.0);
    }

    #[test]
    fn test_on_map_is_strict() {
        assert!(!NormalizedPoint::new(0.0, 0.5).is_on_map());
        assert!(!NormalizedPoint::new(1.0, 0.5).is_on_map());
        assert!(!NormalizedPoint::new(0.5, 0.0).is_on_map());
        assert!(!NormalizedPoint::new(0.5, 1.0).is_on_map());
        assert!(NormalizedPoint::new(0.0001, 0.5).is_on_map());
        assert!(NormalizedPoint::new(0.5, 0.9999).is_on_map());
    }

    #[test]
    fn test_nan_is_off_map() {
        assert!(!NormalizedPoint::new(f64::NAN, 0.5).is_on_map());
    }
}
