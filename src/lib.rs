//! POI Cluster - Viewport-Driven Clustering of Map Points of Interest
//!
//! This library turns a set of point-of-interest records plus the current map
//! viewport (region and pixel dimensions) into the set of markers to render:
//! nearby points merge into clusters at low zoom and split apart as the map
//! zooms in. The grouping is rebuilt reactively as the POI set, the visible
//! region, or the surface dimensions change.
//!
//! # Architecture
//!
//! - **[`PointOfInterest`]**: Immutable POI record supplied by the data layer
//! - **[`PointFeature`] / [`RenderableFeature`]**: Geographic features, with
//!   cluster vs point kept as a sum type for exhaustive dispatch
//! - **[`region_to_bounding_box`] / [`resolve_zoom`]**: Viewport resolution
//!   from a map region and pixel dimensions
//! - **[`ClusterIndex`]**: Grid-bucketed spatial index answering
//!   (bounding box, zoom) cluster queries
//! - **[`PoiCollection`]**: High-level manager with an equality-checked
//!   memoization cache over (POIs, region, dimensions)
//!
//! # Performance Characteristics
//!
//! - **Build Time**: O(N) projection and bucketing per POI-set change
//! - **Query Time**: O(K log K + K x C) where K=candidates in the box,
//!   C=clusters formed
//! - **Memory**: O(N) for the index

mod cluster;
mod collection;
mod feature;
mod poi;
mod render;
pub mod utils;
mod viewport;

// Public API exports
pub use cluster::{ClusterConfig, ClusterIndex};
pub use collection::{Config, PoiCollection};
pub use feature::{ClusterFeature, PointFeature, RenderableFeature};
pub use poi::PointOfInterest;
pub use render::{MarkerRenderer, render_feature, render_features};
pub use viewport::{
    BoundingBox, Region, ViewportDimensions, region_to_bounding_box, resolve_zoom,
};

/// Error types for the clustering engine
///
/// Only configuration validation is fallible; every query path is total over
/// its documented input domain.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid cluster radius {0}: must be positive and finite")]
    InvalidRadius(f64),

    #[error("cluster max zoom {0} exceeds the tile pyramid maximum")]
    ZoomOutOfRange(u8),
}

pub type Result<T> = std::result::Result<T, EngineError>;
