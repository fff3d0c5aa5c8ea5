//! Spatial index for approximate radius queries.
//!
//! An R-tree over raw (lat, lon) degree coordinates, treated as points in
//! a flat 2D plane. Radius queries use Euclidean distance in that plane as
//! a fast superset filter: they may return false positives near the
//! boundary but never miss a point within the degree radius. Callers run
//! the exact great-circle check afterwards.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::distance::GeoPoint;

/// A coordinate pair tagged with its position in the record array it was
/// built from
#[derive(Debug, Clone, PartialEq)]
struct IndexedPoint {
    position: usize,
    coords: [f64; 2],
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.coords[0] - point[0];
        let dy = self.coords[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Static nearest-neighbor index over a point set.
///
/// Built wholesale from an ordered point sequence; position `i` in every
/// query result refers to position `i` of that sequence. Rebuilding means
/// constructing a new index, not mutating this one.
#[derive(Debug)]
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
}

impl PointIndex {
    /// Build an index over an ordered sequence of coordinates.
    ///
    /// An empty input produces an empty index whose queries return empty
    /// results. Repeated builds over the same input answer queries
    /// identically, whatever the internal tree layout.
    pub fn build(points: &[GeoPoint]) -> Self {
        let indexed: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(position, p)| IndexedPoint { position, coords: [p.lat, p.lon] })
            .collect();

        Self { tree: RTree::bulk_load(indexed) }
    }

    /// Return every position whose Euclidean distance from `center` in the
    /// (lat, lon) degree plane is within `degree_radius`, inclusive.
    ///
    /// Positions come back sorted ascending so results follow the order of
    /// the sequence the index was built from.
    pub fn within_degree_radius(&self, center: GeoPoint, degree_radius: f64) -> Vec<usize> {
        if degree_radius < 0.0 {
            return Vec::new();
        }

        let mut positions: Vec<usize> = self
            .tree
            .locate_within_distance([center.lat, center.lon], degree_radius * degree_radius)
            .map(|p| p.position)
            .collect();

        positions.sort_unstable();
        positions
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
