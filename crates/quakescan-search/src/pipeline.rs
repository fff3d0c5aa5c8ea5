//! Search pipeline: radius query, optional flag filter, cluster reduction.

use quakescan_core::config::SearchConfig;
use quakescan_core::error::Result;
use quakescan_core::models::EventHit;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::EventCatalog;
use crate::dedup;

/// A planned proximity search. Unset knobs fall back to the configured
/// defaults at execution time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyPlan {
    /// Query center latitude in decimal degrees
    pub latitude: f64,

    /// Query center longitude in decimal degrees
    pub longitude: f64,

    /// Search radius in kilometers; configured default when unset
    pub radius_km: Option<f64>,

    /// Minimum separation for deduplication in kilometers; configured
    /// default when unset
    pub min_separation_km: Option<f64>,

    /// Whether to collapse near-duplicate events into cluster
    /// representatives
    pub dedup: bool,

    /// Keep only events carrying the tsunami flag
    pub tsunami_only: bool,
}

impl NearbyPlan {
    /// Create a plan centered on the given coordinates
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km: None,
            min_separation_km: None,
            dedup: true,
            tsunami_only: false,
        }
    }

    /// Override the search radius
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Override the deduplication separation
    pub fn with_min_separation_km(mut self, min_separation_km: f64) -> Self {
        self.min_separation_km = Some(min_separation_km);
        self
    }

    /// Return raw radius matches without cluster reduction
    pub fn without_dedup(mut self) -> Self {
        self.dedup = false;
        self
    }

    /// Restrict results to events carrying the tsunami flag
    pub fn with_tsunami_only(mut self, tsunami_only: bool) -> Self {
        self.tsunami_only = tsunami_only;
        self
    }
}

/// Outcome of an executed plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyOutcome {
    /// Matches within the radius (after the flag filter, before
    /// deduplication)
    pub total_matches: usize,

    /// Final event list
    pub events: Vec<EventHit>,
}

/// Executes [`NearbyPlan`]s against a shared catalog with configured
/// defaults
pub struct EventSearch {
    catalog: Arc<EventCatalog>,
    config: SearchConfig,
}

impl EventSearch {
    /// Create a search executor over the given catalog
    pub fn new(catalog: Arc<EventCatalog>, config: SearchConfig) -> Self {
        Self { catalog, config }
    }

    /// The catalog this executor queries
    pub fn catalog(&self) -> &Arc<EventCatalog> {
        &self.catalog
    }

    /// Execute a plan: radius query, then the optional tsunami-only
    /// filter, then the optional cluster reduction
    pub fn execute(&self, plan: &NearbyPlan) -> Result<NearbyOutcome> {
        let radius_km = plan.radius_km.unwrap_or(self.config.search_radius_km.value);

        let mut hits = self.catalog.find_nearby(plan.latitude, plan.longitude, radius_km)?;

        if plan.tsunami_only {
            hits.retain(|hit| hit.event.tsunami);
        }

        let total_matches = hits.len();

        let events = if plan.dedup {
            let min_separation_km =
                plan.min_separation_km.unwrap_or(self.config.dedup_radius_km.value);
            dedup::reduce(hits, min_separation_km)
        } else {
            hits
        };

        tracing::debug!(
            total_matches,
            returned = events.len(),
            radius_km,
            dedup = plan.dedup,
            "executed nearby plan"
        );

        Ok(NearbyOutcome { total_matches, events })
    }
}
