//! Quakescan Search - Proximity queries and spatial deduplication
//!
//! This crate orchestrates the search use cases: it owns the swappable
//! catalog snapshot, runs radius queries through the approximate index
//! followed by the exact distance filter, and collapses spatially
//! redundant results into cluster representatives.

pub mod catalog;
pub mod dedup;
pub mod nearby;
pub mod pipeline;

pub use catalog::{CatalogSnapshot, EventCatalog, LoadSummary};
pub use dedup::reduce;
pub use nearby::find_nearby;
pub use pipeline::{EventSearch, NearbyOutcome, NearbyPlan};
