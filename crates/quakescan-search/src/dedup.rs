//! Cluster-reduce: collapse near-duplicate hits into one representative
//! per spatial cluster.
//!
//! Single-pass greedy and order-sensitive: each hit merges into the FIRST
//! existing representative closer than the separation threshold, not the
//! nearest one, so the outcome depends on input order. This mirrors how
//! duplicate feed entries for the same physical event are collapsed; it
//! is not a globally optimal clustering.

use quakescan_core::models::EventHit;
use quakescan_geo::{haversine_km, GeoPoint};

/// Reduce an ordered hit list to one representative per cluster.
///
/// Walking the input in order, a hit either founds a new cluster (no
/// existing representative within `min_separation_km`) or merges into the
/// first representative that is too close. On a merge, the incoming hit
/// replaces the representative in place when it carries the tsunami
/// priority flag and the representative does not; otherwise it is
/// dropped. Output order is the order of first cluster formation.
///
/// Infallible: empty input yields empty output, and a non-positive
/// separation merges nothing.
pub fn reduce(hits: Vec<EventHit>, min_separation_km: f64) -> Vec<EventHit> {
    let mut representatives: Vec<EventHit> = Vec::new();

    for hit in hits {
        let hit_point = GeoPoint::new(hit.event.latitude, hit.event.longitude);

        let too_close = representatives.iter().position(|rep| {
            let rep_point = GeoPoint::new(rep.event.latitude, rep.event.longitude);
            haversine_km(hit_point, rep_point) < min_separation_km
        });

        match too_close {
            Some(idx) => {
                if hit.event.tsunami && !representatives[idx].event.tsunami {
                    representatives[idx] = hit;
                }
            }
            None => representatives.push(hit),
        }
    }

    representatives
}
