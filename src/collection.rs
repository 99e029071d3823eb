//! PoiCollection - Top-level manager for POIs, the cluster index, and queries
//!
//! This module ties the engine together: it owns the current POI snapshot,
//! the spatial index built from it, and the viewport inputs (region and
//! pixel dimensions), and recomputes the renderable feature set only when
//! one of those three actually changes.

use crate::{
    ClusterConfig, ClusterIndex, PointFeature, PointOfInterest, Region, RenderableFeature, Result,
    ViewportDimensions, region_to_bounding_box, resolve_zoom,
};

/// Configuration for the POI collection
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Clustering parameters forwarded to the spatial index
    pub cluster: ClusterConfig,
    /// Region shown before the map surface reports its first interaction
    pub initial_region: Region,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cluster: ClusterConfig::default(),
            initial_region: Region::default(),
        }
    }
}

/// Cached result of the last clustering pass
#[derive(Clone, Debug)]
struct CachedQuery {
    /// Viewport inputs the cached features were computed for
    region: Region,
    dimensions: ViewportDimensions,
    /// Features produced by that pass
    features: Vec<RenderableFeature>,
}

/// Top-level manager for the POI set and viewport-driven cluster queries
///
/// All methods run synchronously on the caller's thread; the index is
/// rebuilt wholesale on every POI-set change and queried through an
/// equality-checked memoization cache, so identical (POIs, region,
/// dimensions) triples never trigger redundant work.
#[derive(Clone, Debug)]
pub struct PoiCollection {
    /// Current POI snapshot as supplied by the data layer
    pois: Vec<PointOfInterest>,
    /// Spatial index over the current snapshot
    index: ClusterIndex,
    /// Configuration settings
    config: Config,
    /// Latest region reported by the map surface
    region: Region,
    /// Latest pixel dimensions reported by the map surface
    dimensions: ViewportDimensions,
    /// Memoized result of the last query, if still valid
    cache: Option<CachedQuery>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl PoiCollection {
    /// Create a new collection with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("collection::new");

        let index = ClusterIndex::build(config.cluster, &[])?;
        let region = config.initial_region;
        Ok(Self {
            pois: Vec::new(),
            index,
            config,
            region,
            dimensions: ViewportDimensions::default(),
            cache: None,
        })
    }

    /// Replace the POI snapshot
    ///
    /// Rebuilds the spatial index only when the new set actually differs
    /// from the current one; handing over an identical snapshot is a no-op.
    pub fn set_pois(&mut self, pois: Vec<PointOfInterest>) -> Result<()> {
        #[cfg(feature = "profiling")]
        profiling::scope!("collection::set_pois");

        if pois == self.pois {
            return Ok(());
        }

        let features: Vec<PointFeature> = pois.iter().map(PointFeature::from_poi).collect();
        tracing::debug!("Rebuilding cluster index for {} POIs", features.len());
        self.index = ClusterIndex::build(self.config.cluster, &features)?;
        self.pois = pois;
        self.cache = None;
        Ok(())
    }

    /// Update the visible region (pan/zoom interaction completed)
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Update the pixel dimensions of the map surface (layout event)
    pub fn set_dimensions(&mut self, dimensions: ViewportDimensions) {
        self.dimensions = dimensions;
    }

    /// The feature set to render for the current inputs
    ///
    /// Recomputes the bounding box, zoom and cluster query only when POIs,
    /// region or dimensions changed since the previous call; otherwise the
    /// cached result is returned as-is.
    pub fn visible_features(&mut self) -> &[RenderableFeature] {
        #[cfg(feature = "profiling")]
        profiling::scope!("collection::visible_features");

        let up_to_date = self
            .cache
            .as_ref()
            .is_some_and(|c| c.region == self.region && c.dimensions == self.dimensions);

        if !up_to_date {
            let bbox = region_to_bounding_box(&self.region);
            let zoom = resolve_zoom(&bbox, self.dimensions);
            let features = self.index.get_clusters(&bbox, zoom);
            tracing::trace!(
                "Recomputed {} visible features at zoom {}",
                features.len(),
                zoom
            );
            self.cache = Some(CachedQuery {
                region: self.region,
                dimensions: self.dimensions,
                features,
            });
        }

        // The cache was just filled if it was missing or stale
        &self
            .cache
            .as_ref()
            .expect("cache filled by the branch above")
            .features
    }

    /// Look up a POI by id
    ///
    /// Used by the navigation collaborator to move the camera to a marker.
    #[inline]
    pub fn find_poi(&self, id: &str) -> Option<&PointOfInterest> {
        self.pois.iter().find(|poi| poi.id == id)
    }

    /// Current POI snapshot
    #[inline]
    pub fn pois(&self) -> &[PointOfInterest] {
        &self.pois
    }

    /// Number of POIs in the current snapshot
    #[inline]
    pub fn poi_count(&self) -> usize {
        self.pois.len()
    }

    /// Whether the collection holds no POIs
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Latest region reported by the map surface
    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drop all POIs and reset the index
    pub fn clear(&mut self) {
        self.pois.clear();
        self.index = ClusterIndex::default();
        self.cache = None;
    }
}
