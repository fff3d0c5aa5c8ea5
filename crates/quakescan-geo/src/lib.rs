//! Quakescan Geo - Great-circle distance and the spatial index
//!
//! The two geometric building blocks of the proximity search engine: an
//! exact haversine distance and an R-tree pre-filter over raw degree
//! coordinates. The pre-filter may over-fetch and is never exact; callers
//! follow it with the exact distance check.

pub mod distance;
pub mod index;

pub use distance::{
    approx_degree_radius, haversine_km, round_km, GeoPoint, EARTH_RADIUS_KM, KM_PER_DEGREE,
};
pub use index::PointIndex;
