//! Viewport resolution: map region to bounding box and zoom level
//!
//! The map surface reports a [`Region`] (center plus delta spans) on every
//! interaction and [`ViewportDimensions`] on every layout event. This module
//! derives the geographic [`BoundingBox`] and the integer zoom level at
//! which that box tightly fits the pixel viewport, using the standard
//! logarithmic relationship between geographic span and tile zoom.

use crate::utils;
use geo::Point;

/// The currently visible map viewport as reported by the map surface
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Center coordinate (x = longitude, y = latitude)
    pub center: Point<f64>,
    /// Visible latitude span in degrees
    pub latitude_delta: f64,
    /// Visible longitude span in degrees
    pub longitude_delta: f64,
}

impl Region {
    /// Create a region from a center coordinate and delta spans
    pub fn new(center: Point<f64>, latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            center,
            latitude_delta,
            longitude_delta,
        }
    }
}

impl Default for Region {
    /// Whole-world overview centered on the null island
    fn default() -> Self {
        Self {
            center: Point::new(0.0, 0.0),
            latitude_delta: 90.0,
            longitude_delta: 180.0,
        }
    }
}

/// Pixel size of the rendered map surface
///
/// Defaults to 1x1 so zoom resolution stays defined before the first layout
/// event reports real dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportDimensions {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl ViewportDimensions {
    /// Create viewport dimensions from a pixel width and height
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for ViewportDimensions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

/// Rectangular geographic bounds in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Western longitude bound
    pub west: f64,
    /// Southern latitude bound
    pub south: f64,
    /// Eastern longitude bound
    pub east: f64,
    /// Northern latitude bound
    pub north: f64,
}

impl BoundingBox {
    /// Create a bounding box from its four bounds
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Longitude span in degrees
    #[inline]
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Latitude span in degrees
    #[inline]
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Whether a coordinate (x = longitude, y = latitude) lies inside the box
    #[inline]
    pub fn contains(&self, coordinate: Point<f64>) -> bool {
        coordinate.x() >= self.west
            && coordinate.x() <= self.east
            && coordinate.y() >= self.south
            && coordinate.y() <= self.north
    }
}

/// Convert a map region into its geographic bounding box
///
/// Bounds are center plus or minus half of each delta span. Deterministic:
/// the same region always produces the same box.
pub fn region_to_bounding_box(region: &Region) -> BoundingBox {
    let half_lat = region.latitude_delta / 2.0;
    let half_lng = region.longitude_delta / 2.0;

    BoundingBox {
        west: region.center.x() - half_lng,
        south: region.center.y() - half_lat,
        east: region.center.x() + half_lng,
        north: region.center.y() + half_lat,
    }
}

/// Resolve the integer zoom level at which `bbox` tightly fits `dimensions`
///
/// For each axis the zoom is `log2(pixels / (TILE_SIZE * world_span))`; the
/// box fits at the floor of the smaller of the two, clamped to
/// `[0, MAX_ZOOM]`. Zero pixel dimensions fall back to 1 so the computation
/// stays defined, and a degenerate zero-span axis is treated as infinitely
/// zoomable (clamping takes over).
pub fn resolve_zoom(bbox: &BoundingBox, dimensions: ViewportDimensions) -> u8 {
    let width = dimensions.width.max(1.0);
    let height = dimensions.height.max(1.0);

    // World-fraction spans; y grows southward so south maps below north
    let span_x = utils::lng_to_world_x(bbox.east) - utils::lng_to_world_x(bbox.west);
    let span_y = utils::lat_to_world_y(bbox.south) - utils::lat_to_world_y(bbox.north);

    let axis_zoom = |pixels: f64, span: f64| -> f64 {
        if span > 0.0 {
            (pixels / (utils::TILE_SIZE * span)).log2()
        } else {
            f64::INFINITY
        }
    };

    let zoom = axis_zoom(width, span_x).min(axis_zoom(height, span_y));
    zoom.floor().clamp(0.0, f64::from(utils::MAX_ZOOM)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MAX_ZOOM;

    #[test]
    fn test_region_to_bounding_box() {
        let region = Region::new(Point::new(0.0, 0.0), 2.0, 2.0);
        let bbox = region_to_bounding_box(&region);

        assert_eq!(bbox.west, -1.0);
        assert_eq!(bbox.south, -1.0);
        assert_eq!(bbox.east, 1.0);
        assert_eq!(bbox.north, 1.0);
    }

    #[test]
    fn test_region_to_bounding_box_off_center() {
        let region = Region::new(Point::new(-0.1278, 51.5074), 0.02, 0.04);
        let bbox = region_to_bounding_box(&region);

        assert!((bbox.west - (-0.1478)).abs() < 1e-12);
        assert!((bbox.east - (-0.1078)).abs() < 1e-12);
        assert!((bbox.south - 51.4974).abs() < 1e-12);
        assert!((bbox.north - 51.5174).abs() < 1e-12);
    }

    #[test]
    fn test_region_to_bounding_box_deterministic() {
        let region = Region::new(Point::new(30.3, 59.95), 0.1, 0.2);
        assert_eq!(
            region_to_bounding_box(&region),
            region_to_bounding_box(&region)
        );
    }

    #[test]
    fn test_bounding_box_contains() {
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
        assert!(bbox.contains(Point::new(0.0, 0.0)));
        assert!(bbox.contains(Point::new(1.0, -1.0)));
        assert!(!bbox.contains(Point::new(1.5, 0.0)));
        assert!(!bbox.contains(Point::new(0.0, -1.5)));
    }

    #[test]
    fn test_resolve_zoom_known_viewport() {
        // A 2x2 degree box on a 1024x768 screen fits at zoom 9:
        // x axis: log2(1024 / (256 * 2/360)) ~= 9.49
        // y axis: log2(768 / (256 * mercator span)) ~= 9.08
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
        let zoom = resolve_zoom(&bbox, ViewportDimensions::new(1024.0, 768.0));
        assert_eq!(zoom, 9);
    }

    #[test]
    fn test_resolve_zoom_shrinking_span_increases_zoom() {
        let dimensions = ViewportDimensions::new(1024.0, 768.0);
        let wide = BoundingBox::new(-10.0, -10.0, 10.0, 10.0);
        let narrow = BoundingBox::new(-0.01, -0.01, 0.01, 0.01);

        assert!(resolve_zoom(&narrow, dimensions) > resolve_zoom(&wide, dimensions));
    }

    #[test]
    fn test_resolve_zoom_degenerate_dimensions() {
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);

        for dimensions in [
            ViewportDimensions::new(0.0, 0.0),
            ViewportDimensions::new(0.0, 768.0),
            ViewportDimensions::new(1024.0, 0.0),
            ViewportDimensions::default(),
        ] {
            let zoom = resolve_zoom(&bbox, dimensions);
            assert!(zoom <= MAX_ZOOM);
        }
    }

    #[test]
    fn test_resolve_zoom_degenerate_bbox() {
        // Zero-area box clamps to the maximum zoom instead of failing
        let bbox = BoundingBox::new(0.0, 0.0, 0.0, 0.0);
        let zoom = resolve_zoom(&bbox, ViewportDimensions::new(1024.0, 768.0));
        assert_eq!(zoom, MAX_ZOOM);
    }

    #[test]
    fn test_resolve_zoom_world_view_is_low() {
        let bbox = BoundingBox::new(-180.0, -85.0, 180.0, 85.0);
        let zoom = resolve_zoom(&bbox, ViewportDimensions::new(256.0, 256.0));
        assert_eq!(zoom, 0);
    }

    #[test]
    fn test_defaults() {
        let dimensions = ViewportDimensions::default();
        assert_eq!(dimensions.width, 1.0);
        assert_eq!(dimensions.height, 1.0);

        let region = Region::default();
        assert_eq!(region.center, Point::new(0.0, 0.0));
        assert!(region.latitude_delta > 0.0 && region.longitude_delta > 0.0);
    }
}
