//! R-tree over region service areas.
//!
//! ## Two-Stage Filtering
//!
//! Lookups use the R-tree with planar (degree) distances to narrow the
//! candidates, then rank the survivors by Haversine distance. Planar distance
//! in degrees distorts with latitude, so it is only trusted for pruning.

use std::collections::HashSet;
use std::sync::Arc;

use geo::{coord, Point};
use rstar::{Envelope, PointDistance, RTree, RTreeObject, AABB};

use crate::models::region::{Region, RegionBound};
use crate::spatial::queries::haversine_distance;

/// How many R-tree neighbours are re-ranked by geodesic distance.
const NEAREST_CANDIDATES: usize = 8;

// ============================================================================
// Region Bound Spatial Node
// ============================================================================

/// One rectangle of one region. A region with several bounds gets several nodes.
#[derive(Clone)]
pub struct RegionBoundNode {
    pub region: Arc<Region>,
    aabb: AABB<[f64; 2]>,
}

impl RegionBoundNode {
    pub fn new(bound: &RegionBound, region: Arc<Region>) -> Self {
        let rect = bound.rect();
        let aabb = AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
        Self { region, aabb }
    }

    /// Closest point of this bound to `point` (the point itself when inside).
    fn closest_point(&self, point: Point) -> Point {
        let lower = self.aabb.lower();
        let upper = self.aabb.upper();
        Point::from(coord! {
            x: point.x().clamp(lower[0], upper[0]),
            y: point.y().clamp(lower[1], upper[1]),
        })
    }
}

impl RTreeObject for RegionBoundNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

impl PointDistance for RegionBoundNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        Envelope::distance_2(&self.aabb, point)
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        Envelope::contains_point(&self.aabb, point)
    }
}

// ============================================================================
// Region Index
// ============================================================================

#[derive(Clone, Default)]
pub struct RegionIndex {
    tree: RTree<RegionBoundNode>,
}

impl RegionIndex {
    pub fn build(regions: &[Arc<Region>]) -> Self {
        let nodes = regions
            .iter()
            .flat_map(|region| {
                region
                    .bounds
                    .iter()
                    .map(|bound| RegionBoundNode::new(bound, region.clone()))
            })
            .collect();

        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Regions with a bound covering `point`, each listed once.
    pub fn regions_at(&self, point: Point) -> Vec<Arc<Region>> {
        let mut seen = HashSet::new();
        self.tree
            .locate_all_at_point(&[point.x(), point.y()])
            .filter(|node| seen.insert(node.region.id))
            .map(|node| node.region.clone())
            .collect()
    }

    /// The region whose service area is geodesically closest to `point`,
    /// with that distance in meters (zero when inside).
    pub fn nearest(&self, point: Point) -> Option<(Arc<Region>, f64)> {
        self.tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(NEAREST_CANDIDATES)
            .map(|node| {
                let distance = haversine_distance(point, node.closest_point(point));
                (node.region.clone(), distance)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
