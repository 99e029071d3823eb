//! Spatial cluster index for viewport queries
//!
//! The index is built once per POI-set change: every point feature is
//! projected into world coordinates and bucketed into a fixed-zoom grid.
//! Queries take a bounding box and a zoom level, collect the candidate
//! points from the grid, and greedily merge points whose on-screen pixel
//! distance at that zoom falls below the configured radius.
//!
//! Determinism: candidates are always processed in insertion order, and
//! a cluster's id is the index of its first member, so identical
//! (features, bbox, zoom) inputs yield identical output, including stable
//! render keys.

use crate::{
    BoundingBox, ClusterFeature, EngineError, PointFeature, RenderableFeature, Result, utils,
};
use geo::Point;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Zoom level at which grid cells are keyed (about 1/4096 of the world per axis)
const GRID_ZOOM: u32 = 12;

/// Number of grid cells per axis
const GRID_CELLS: u32 = 1 << GRID_ZOOM;

/// Tunable clustering parameters
///
/// Defaults to a 40 pixel merge radius and no clustering at or above zoom 16.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterConfig {
    /// Merge radius in pixels at the query zoom
    pub radius: f64,
    /// Zoom level at and above which every point is returned unclustered
    pub max_zoom: u8,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            radius: 40.0,
            max_zoom: 16,
        }
    }
}

impl ClusterConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(EngineError::InvalidRadius(self.radius));
        }
        if self.max_zoom > utils::MAX_ZOOM {
            return Err(EngineError::ZoomOutOfRange(self.max_zoom));
        }
        Ok(())
    }
}

/// A point feature projected into world coordinates, stored in insertion order
#[derive(Clone, Debug)]
struct IndexedPoint {
    /// Identity of the source POI
    poi_id: String,
    /// Original geographic coordinate (x = longitude, y = latitude)
    coordinate: Point<f64>,
    /// Projected world coordinate in [0, 1] x [0, 1]
    world: Point<f64>,
}

/// Accumulating cluster state during a greedy pass
struct ClusterAccum {
    /// Index of the first member point, also used as the cluster id
    anchor: u32,
    /// Running sum of member world x coordinates
    sum_x: f64,
    /// Running sum of member world y coordinates
    sum_y: f64,
    /// Number of members
    count: usize,
}

impl ClusterAccum {
    #[inline]
    fn centroid(&self) -> Point<f64> {
        Point::new(
            self.sum_x / self.count as f64,
            self.sum_y / self.count as f64,
        )
    }
}

/// In-memory spatial index over a fixed set of point features
#[derive(Clone, Debug, Default)]
pub struct ClusterIndex {
    /// Clustering parameters
    config: ClusterConfig,
    /// All indexed points in insertion order
    points: Vec<IndexedPoint>,
    /// Grid buckets keyed by cell coordinate at `GRID_ZOOM`
    cells: HashMap<(u32, u32), SmallVec<[u32; 4]>>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl ClusterIndex {
    /// Build an index over the given point features
    ///
    /// Features with non-finite coordinates are skipped with a warning; the
    /// data layer is expected not to produce them. Repeated builds on the
    /// same input produce an index yielding identical query results.
    pub fn build(config: ClusterConfig, features: &[PointFeature]) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("cluster::build");

        config.validate()?;

        let mut points = Vec::with_capacity(features.len());
        let mut cells: HashMap<(u32, u32), SmallVec<[u32; 4]>> = HashMap::new();

        for feature in features {
            let coordinate = feature.coordinate;
            if !coordinate.x().is_finite() || !coordinate.y().is_finite() {
                tracing::warn!(
                    "Skipping feature {} with non-finite coordinate ({}, {})",
                    feature.poi_id,
                    coordinate.y(),
                    coordinate.x()
                );
                continue;
            }

            let world = utils::project(coordinate);
            let index = points.len() as u32;
            cells.entry(cell_of(world)).or_default().push(index);
            points.push(IndexedPoint {
                poi_id: feature.poi_id.clone(),
                coordinate,
                world,
            });
        }

        tracing::debug!(
            "Built cluster index over {} points in {} grid cells",
            points.len(),
            cells.len()
        );

        Ok(Self {
            config,
            points,
            cells,
        })
    }

    /// Number of indexed points
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index holds no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Clustering parameters this index was built with
    #[inline]
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Return the visible mix of clusters and standalone points
    ///
    /// The box is padded by one cluster radius so markers straddling the
    /// boundary do not pop in and out while panning. Every candidate point
    /// lands in exactly one returned feature. Zoom values above the tile
    /// pyramid maximum are clamped.
    pub fn get_clusters(&self, bbox: &BoundingBox, zoom: u8) -> Vec<RenderableFeature> {
        #[cfg(feature = "profiling")]
        profiling::scope!("cluster::get_clusters");

        if self.points.is_empty() {
            return Vec::new();
        }

        let zoom = zoom.min(utils::MAX_ZOOM);
        // Pixel radius converted to world units at this zoom
        let radius_world = self.config.radius / utils::world_scale(zoom);

        let min_x = utils::lng_to_world_x(bbox.west) - radius_world;
        let max_x = utils::lng_to_world_x(bbox.east) + radius_world;
        let min_y = utils::lat_to_world_y(bbox.north) - radius_world;
        let max_y = utils::lat_to_world_y(bbox.south) + radius_world;

        let candidates = self.candidates_in(min_x, min_y, max_x, max_y);

        if zoom >= self.config.max_zoom {
            // Fully de-clustered view
            return candidates
                .into_iter()
                .map(|index| self.point_feature(index))
                .collect();
        }

        let mut accums: Vec<ClusterAccum> = Vec::new();
        for index in candidates {
            let world = self.points[index as usize].world;

            let joined = accums.iter_mut().find(|accum| {
                let centroid = accum.centroid();
                let dx = world.x() - centroid.x();
                let dy = world.y() - centroid.y();
                dx * dx + dy * dy < radius_world * radius_world
            });

            match joined {
                Some(accum) => {
                    accum.sum_x += world.x();
                    accum.sum_y += world.y();
                    accum.count += 1;
                }
                None => accums.push(ClusterAccum {
                    anchor: index,
                    sum_x: world.x(),
                    sum_y: world.y(),
                    count: 1,
                }),
            }
        }

        accums
            .into_iter()
            .map(|accum| {
                if accum.count == 1 {
                    self.point_feature(accum.anchor)
                } else {
                    RenderableFeature::Cluster(ClusterFeature {
                        id: u64::from(accum.anchor),
                        coordinate: utils::unproject(accum.centroid()),
                        count: accum.count,
                    })
                }
            })
            .collect()
    }

    /// Build a standalone point feature for an indexed point
    fn point_feature(&self, index: u32) -> RenderableFeature {
        let point = &self.points[index as usize];
        RenderableFeature::Point(PointFeature {
            poi_id: point.poi_id.clone(),
            coordinate: point.coordinate,
        })
    }

    /// Collect indices of points inside the world-space box, in insertion order
    ///
    /// When the box covers more grid cells than are occupied, the occupied
    /// cells are scanned instead, keeping whole-world queries O(n).
    fn candidates_in(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<u32> {
        let min_cx = cell_coord(min_x);
        let max_cx = cell_coord(max_x);
        let min_cy = cell_coord(min_y);
        let max_cy = cell_coord(max_y);

        let range_cells =
            u64::from(max_cx - min_cx + 1).saturating_mul(u64::from(max_cy - min_cy + 1));

        let mut indices: Vec<u32> = Vec::new();
        if range_cells > self.cells.len() as u64 {
            for (&(cx, cy), bucket) in &self.cells {
                if cx >= min_cx && cx <= max_cx && cy >= min_cy && cy <= max_cy {
                    indices.extend_from_slice(bucket);
                }
            }
        } else {
            for cx in min_cx..=max_cx {
                for cy in min_cy..=max_cy {
                    if let Some(bucket) = self.cells.get(&(cx, cy)) {
                        indices.extend_from_slice(bucket);
                    }
                }
            }
        }

        // Grid iteration order is arbitrary; restore insertion order
        indices.sort_unstable();

        indices.retain(|&index| {
            let world = self.points[index as usize].world;
            world.x() >= min_x && world.x() <= max_x && world.y() >= min_y && world.y() <= max_y
        });

        indices
    }
}

/// Grid cell coordinate for one world-space axis value
#[inline]
fn cell_coord(value: f64) -> u32 {
    let scaled = (value.clamp(0.0, 1.0) * f64::from(GRID_CELLS)).floor() as u32;
    scaled.min(GRID_CELLS - 1)
}

/// Grid cell of a world-space point
#[inline]
fn cell_of(world: Point<f64>) -> (u32, u32) {
    (cell_coord(world.x()), cell_coord(world.y()))
}
