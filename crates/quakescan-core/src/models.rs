use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::error::{QuakescanError, Result};

/// A single spatially-located seismic event.
///
/// Records are created in bulk when the upstream feed is parsed and are
/// immutable once ingested. Known fields are typed; anything else the feed
/// carries lands in [`EventRecord::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Latitude in decimal degrees, in [-90, 90]
    pub latitude: f64,

    /// Longitude in decimal degrees, in [-180, 180]
    pub longitude: f64,

    /// Event magnitude. Some feeds omit it for small or preliminary events.
    #[serde(default)]
    pub magnitude: Option<f64>,

    /// Human-readable event title
    #[serde(default)]
    pub title: String,

    /// Named location of the event
    #[serde(default)]
    pub place: String,

    /// Link to the upstream event page
    #[serde(default)]
    pub url: String,

    /// Priority flag: set when the event carries a tsunami indicator.
    /// Wins tie-breaks during spatial deduplication. Upstream feeds encode
    /// this as 0/1, so deserialization accepts both booleans and integers.
    #[serde(default, deserialize_with = "flag_from_bool_or_int")]
    pub tsunami: bool,

    /// Open attribute bag for feed fields without a dedicated column
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl EventRecord {
    /// Create a record at the given coordinates with empty attributes
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            magnitude: None,
            title: String::new(),
            place: String::new(),
            url: String::new(),
            tsunami: false,
            extra: HashMap::new(),
        }
    }

    /// Set the magnitude
    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the place
    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = place.into();
        self
    }

    /// Set the upstream URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the tsunami priority flag
    pub fn with_tsunami(mut self, tsunami: bool) -> Self {
        self.tsunami = tsunami;
        self
    }

    /// Attach an extra attribute
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Check that the coordinates are finite and within geographic range
    pub fn validate_coordinates(&self) -> Result<()> {
        validate_coordinates(self.latitude, self.longitude)
    }
}

/// Validate a (latitude, longitude) pair: finite and within WGS84 range
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<()> {
    let in_range = lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon);

    if !in_range {
        return Err(QuakescanError::InvalidCoordinate { lat, lon });
    }
    Ok(())
}

/// A query result: an event record plus its great-circle distance from the
/// query center, rounded to 2 decimal places. Transient, per-query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHit {
    #[serde(flatten)]
    pub event: EventRecord,

    /// Distance from the query center in kilometers
    pub distance_km: f64,
}

impl EventHit {
    /// Pair a record with its computed distance
    pub fn new(event: EventRecord, distance_km: f64) -> Self {
        Self { event, distance_km }
    }
}

/// Accept the priority flag as a boolean or as the upstream 0/1 integer
fn flag_from_bool_or_int<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
    }

    match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(b) => Ok(b),
        BoolOrInt::Int(i) => Ok(i != 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = EventRecord::new(35.7, 139.7)
            .with_magnitude(5.4)
            .with_title("M 5.4 - near Tokyo")
            .with_place("near Tokyo, Japan")
            .with_tsunami(true);

        assert_eq!(record.latitude, 35.7);
        assert_eq!(record.longitude, 139.7);
        assert_eq!(record.magnitude, Some(5.4));
        assert!(record.tsunami);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_validate_coordinates_accepts_range() {
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(validate_coordinates(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_validate_coordinates_rejects_out_of_range() {
        assert!(validate_coordinates(90.5, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_tsunami_flag_accepts_integer() {
        let record: EventRecord = serde_json::from_str(
            r#"{"latitude": 1.0, "longitude": 2.0, "tsunami": 1}"#,
        )
        .unwrap();
        assert!(record.tsunami);

        let record: EventRecord = serde_json::from_str(
            r#"{"latitude": 1.0, "longitude": 2.0, "tsunami": 0}"#,
        )
        .unwrap();
        assert!(!record.tsunami);
    }

    #[test]
    fn test_tsunami_flag_accepts_bool() {
        let record: EventRecord = serde_json::from_str(
            r#"{"latitude": 1.0, "longitude": 2.0, "tsunami": true}"#,
        )
        .unwrap();
        assert!(record.tsunami);
    }

    #[test]
    fn test_unknown_fields_land_in_extra() {
        let record: EventRecord = serde_json::from_str(
            r#"{"latitude": 1.0, "longitude": 2.0, "depth_km": 10.5, "status": "reviewed"}"#,
        )
        .unwrap();

        assert_eq!(record.extra.get("depth_km"), Some(&serde_json::json!(10.5)));
        assert_eq!(record.extra.get("status"), Some(&serde_json::json!("reviewed")));
    }

    #[test]
    fn test_hit_serializes_flat() {
        let hit = EventHit::new(
            EventRecord::new(1.0, 2.0).with_title("M 3.1"),
            42.25,
        );
        let value = serde_json::to_value(&hit).unwrap();

        assert_eq!(value["latitude"], serde_json::json!(1.0));
        assert_eq!(value["distance_km"], serde_json::json!(42.25));
        assert_eq!(value["title"], serde_json::json!("M 3.1"));
    }
}
