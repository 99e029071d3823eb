//! Renderable map features produced by the clustering engine
//!
//! A clustering pass turns the POI set into a mix of standalone points and
//! aggregate clusters. The two variants are kept as a sum type so marker
//! dispatch stays exhaustive and compiler-checked.

use crate::PointOfInterest;
use geo::Point;

/// A single POI projected onto the map, tagged as non-cluster
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointFeature {
    /// Identity of the source POI
    pub poi_id: String,
    /// Geographic coordinate (x = longitude, y = latitude)
    pub coordinate: Point<f64>,
}

/// An aggregate of nearby POIs displayed as a single marker with a count
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterFeature {
    /// Deterministic aggregate id, stable for identical queries
    pub id: u64,
    /// Representative coordinate (centroid of the member points)
    pub coordinate: Point<f64>,
    /// Number of POIs contained in this cluster
    pub count: usize,
}

/// Either a standalone point or a cluster of points
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderableFeature {
    /// A single POI with no neighbors within the cluster radius
    Point(PointFeature),
    /// Two or more POIs merged at the query zoom
    Cluster(ClusterFeature),
}

impl PointFeature {
    /// Convert a POI record into a point feature
    ///
    /// Pure and total: the coordinate is taken as provided. The data layer
    /// is responsible for not handing over non-finite coordinates.
    #[inline]
    pub fn from_poi(poi: &PointOfInterest) -> Self {
        Self {
            poi_id: poi.id.clone(),
            coordinate: poi.coordinate(),
        }
    }
}

impl From<&PointOfInterest> for PointFeature {
    #[inline]
    fn from(poi: &PointOfInterest) -> Self {
        Self::from_poi(poi)
    }
}

impl RenderableFeature {
    /// Whether this feature is a cluster
    #[inline]
    pub fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster(_))
    }

    /// Coordinate at which to place the marker
    #[inline]
    pub fn coordinate(&self) -> Point<f64> {
        match self {
            Self::Point(point) => point.coordinate,
            Self::Cluster(cluster) => cluster.coordinate,
        }
    }

    /// Number of POIs this feature accounts for
    #[inline]
    pub fn point_count(&self) -> usize {
        match self {
            Self::Point(_) => 1,
            Self::Cluster(cluster) => cluster.count,
        }
    }

    /// Stable key for rendering, unique within one clustering pass
    pub fn render_key(&self) -> String {
        match self {
            Self::Point(point) => point.poi_id.clone(),
            Self::Cluster(cluster) => format!("cluster_{}", cluster.id),
        }
    }
}
