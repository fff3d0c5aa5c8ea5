//! The event catalog: one immutable snapshot, swapped wholesale on refresh.
//!
//! Reader locks are held only long enough to clone the snapshot `Arc`, so
//! queries never contend with each other and a rebuild never tears the
//! record/index correspondence out from under an in-flight query.
//!
//! `RwLock::unwrap()` is used intentionally here. Lock poisoning only
//! occurs when another thread panicked while holding the lock, which is an
//! unrecoverable state.

use chrono::{DateTime, Utc};
use quakescan_core::error::Result;
use quakescan_core::models::{EventHit, EventRecord};
use quakescan_geo::{GeoPoint, PointIndex};
use std::sync::{Arc, RwLock};

use crate::nearby;

/// An immutable catalog snapshot: the record array and the spatial index
/// built over it, frozen together.
///
/// The index stores positions into `events`, so position `i` of a query
/// result always refers to `events[i]` of the same snapshot.
#[derive(Debug)]
pub struct CatalogSnapshot {
    events: Vec<EventRecord>,
    index: PointIndex,
    version: u64,
    loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    fn build(events: Vec<EventRecord>, version: u64) -> Self {
        let coords: Vec<GeoPoint> =
            events.iter().map(|e| GeoPoint::new(e.latitude, e.longitude)).collect();

        Self {
            index: PointIndex::build(&coords),
            events,
            version,
            loaded_at: Utc::now(),
        }
    }

    /// The records this snapshot was built from, in build order
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// The spatial index over the record coordinates
    pub fn index(&self) -> &PointIndex {
        &self.index
    }

    /// Monotonically increasing rebuild counter
    pub fn version(&self) -> u64 {
        self.version
    }

    /// When this snapshot was built
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Number of records in the snapshot
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the snapshot holds no records
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Summary of a completed catalog load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of records in the new snapshot
    pub records: usize,

    /// Version of the new snapshot
    pub version: u64,
}

/// Owner of the current catalog snapshot.
///
/// Read-mostly: many concurrent queries share the current snapshot; a data
/// refresh builds a fresh snapshot off to the side and swaps it in
/// atomically.
#[derive(Debug, Default)]
pub struct EventCatalog {
    current: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl EventCatalog {
    /// Create a catalog with no data loaded. Queries return empty results
    /// until the first successful [`load`](Self::load).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog contents with a fresh snapshot.
    ///
    /// Every record's coordinates are validated before anything is
    /// swapped; on a validation error the previous snapshot stays in
    /// place untouched. An empty record list is valid and produces an
    /// empty (but present) snapshot.
    pub fn load(&self, events: Vec<EventRecord>) -> Result<LoadSummary> {
        for event in &events {
            event.validate_coordinates()?;
        }

        let mut current = self.current.write().unwrap();
        let version = current.as_ref().map(|s| s.version() + 1).unwrap_or(1);
        let snapshot = Arc::new(CatalogSnapshot::build(events, version));

        let summary = LoadSummary { records: snapshot.len(), version };
        *current = Some(snapshot);

        tracing::info!(records = summary.records, version = summary.version, "rebuilt event catalog");
        Ok(summary)
    }

    /// The current snapshot, if any data has been loaded
    pub fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.current.read().unwrap().clone()
    }

    /// Find all events within `radius_km` of the given center, with exact
    /// great-circle distances attached.
    ///
    /// Returns an empty list when no data has ever been loaded; rejects
    /// non-finite or out-of-range coordinates and non-positive radii.
    pub fn find_nearby(&self, lat: f64, lon: f64, radius_km: f64) -> Result<Vec<EventHit>> {
        match self.snapshot() {
            Some(snapshot) => nearby::find_nearby(&snapshot, GeoPoint::new(lat, lon), radius_km),
            None => {
                // Degraded but valid: validate the query anyway so bad
                // input does not start succeeding just because the feed
                // has not arrived yet
                nearby::validate_query(GeoPoint::new(lat, lon), radius_km)?;
                Ok(Vec::new())
            }
        }
    }

    /// Number of records in the current snapshot, 0 when none is loaded
    pub fn len(&self) -> usize {
        self.snapshot().map(|s| s.len()).unwrap_or(0)
    }

    /// Check if the catalog currently holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a snapshot is present (even an empty one)
    pub fn is_loaded(&self) -> bool {
        self.current.read().unwrap().is_some()
    }

    /// Version of the current snapshot, 0 when none is loaded
    pub fn version(&self) -> u64 {
        self.snapshot().map(|s| s.version()).unwrap_or(0)
    }
}
