//! Marker selection: dispatching renderable features to their visual form
//!
//! The engine never draws anything itself. The presentation layer supplies a
//! [`MarkerRenderer`] and this module routes each feature to the matching
//! callback, keeping the cluster/point decision in one exhaustive match.

use crate::{ClusterFeature, PointFeature, RenderableFeature};

/// Receiver for the per-feature rendering callbacks
///
/// Implemented by the presentation layer (one marker widget per callback).
/// Point markers usually also wire up a selection handler carrying the POI
/// id; that wiring stays outside the engine.
pub trait MarkerRenderer {
    /// Render an aggregate cluster marker (count badge at the centroid)
    fn cluster_marker(&mut self, cluster: &ClusterFeature);

    /// Render a single POI marker
    fn poi_marker(&mut self, point: &PointFeature);
}

/// Dispatch a single feature to the matching renderer callback
#[inline]
pub fn render_feature(feature: &RenderableFeature, renderer: &mut impl MarkerRenderer) {
    match feature {
        RenderableFeature::Cluster(cluster) => renderer.cluster_marker(cluster),
        RenderableFeature::Point(point) => renderer.poi_marker(point),
    }
}

/// Dispatch a whole clustering pass in order
pub fn render_features(features: &[RenderableFeature], renderer: &mut impl MarkerRenderer) {
    for feature in features {
        render_feature(feature, renderer);
    }
}
