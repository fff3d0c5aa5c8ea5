//! Exact great-circle distance on a spherical Earth.

use serde::{Deserialize, Serialize};

/// Earth radius in kilometers for the spherical distance model
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers spanned by one degree of latitude. Used to convert a
/// kilometer radius into a conservative degree radius for the index
/// pre-filter. This is an approximation, not an exact conversion: one
/// degree of longitude shrinks with latitude, so the pre-filter must
/// always be followed by an exact distance check.
pub const KM_PER_DEGREE: f64 = 111.0;

/// A geographic coordinate pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Haversine formula in the numerically stable `asin(sqrt(a))` form, so
/// distance values are reproducible up to standard floating-point
/// rounding. Callers are trusted to supply valid geographic coordinates;
/// no range validation is performed here.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Convert a kilometer radius into the degree radius used by the index
/// pre-filter
pub fn approx_degree_radius(radius_km: f64) -> f64 {
    radius_km / KM_PER_DEGREE
}

/// Round a distance to 2 decimal places for presentation
pub fn round_km(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}
