//! The proximity query engine: approximate candidate retrieval followed by
//! the exact great-circle filter.

use quakescan_core::error::{QuakescanError, Result};
use quakescan_core::models::{validate_coordinates, EventHit};
use quakescan_geo::{approx_degree_radius, haversine_km, round_km, GeoPoint};

use crate::catalog::CatalogSnapshot;

/// Check the query preconditions: finite in-range center, positive finite
/// radius
pub fn validate_query(center: GeoPoint, radius_km: f64) -> Result<()> {
    validate_coordinates(center.lat, center.lon)?;

    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(QuakescanError::InvalidRadius { radius_km });
    }

    Ok(())
}

/// Find all events in the snapshot within `radius_km` of `center`.
///
/// The index pre-filter may over-fetch; every candidate is checked
/// against the exact haversine distance and kept only when
/// `distance <= radius_km`. Each surviving record is paired with its
/// distance, rounded to 2 decimal places. Results follow the snapshot's
/// record order, though callers should not rely on any particular order.
pub fn find_nearby(
    snapshot: &CatalogSnapshot,
    center: GeoPoint,
    radius_km: f64,
) -> Result<Vec<EventHit>> {
    validate_query(center, radius_km)?;

    let degree_radius = approx_degree_radius(radius_km);
    let candidates = snapshot.index().within_degree_radius(center, degree_radius);

    let mut hits = Vec::new();
    for position in &candidates {
        let event = &snapshot.events()[*position];
        let distance = haversine_km(center, GeoPoint::new(event.latitude, event.longitude));

        if distance <= radius_km {
            hits.push(EventHit::new(event.clone(), round_km(distance)));
        }
    }

    tracing::debug!(
        candidates = candidates.len(),
        hits = hits.len(),
        radius_km,
        "proximity query"
    );

    Ok(hits)
}
