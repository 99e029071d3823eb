//! Utility functions for coordinate projection and tiling constants
//!
//! Coordinates are projected into "world" space: the whole mercator square
//! mapped to the unit interval on both axes, with y growing southward. At
//! zoom `z` the world is `TILE_SIZE * 2^z` pixels across, so pixel math at
//! any zoom reduces to scaling world-space distances.

use geo::Point;

/// Side length of a map tile in pixels (standard web-map tiling)
pub const TILE_SIZE: f64 = 256.0;

/// Maximum zoom level of the tile pyramid
pub const MAX_ZOOM: u8 = 20;

/// Maximum latitude that can be represented in Web Mercator
pub const MAX_LATITUDE: f64 = 85.05112878;

/// Convert a longitude in degrees to a world x coordinate in [0, 1]
#[inline(always)]
pub fn lng_to_world_x(lng: f64) -> f64 {
    lng / 360.0 + 0.5
}

/// Convert a latitude in degrees to a world y coordinate in [0, 1]
///
/// Latitudes beyond the Web Mercator range clamp to the poles (y = 0 or 1).
#[inline(always)]
pub fn lat_to_world_y(lat: f64) -> f64 {
    let sin = lat.to_radians().sin();
    let y = 0.5 - 0.25 * ((1.0 + sin) / (1.0 - sin)).ln() / std::f64::consts::PI;
    y.clamp(0.0, 1.0)
}

/// Project a WGS84 coordinate (x = longitude, y = latitude) into world space
#[inline(always)]
pub fn project(coordinate: Point<f64>) -> Point<f64> {
    Point::new(lng_to_world_x(coordinate.x()), lat_to_world_y(coordinate.y()))
}

/// Convert a world x coordinate back to a longitude in degrees
#[inline(always)]
pub fn world_x_to_lng(x: f64) -> f64 {
    (x - 0.5) * 360.0
}

/// Convert a world y coordinate back to a latitude in degrees
#[inline(always)]
pub fn world_y_to_lat(y: f64) -> f64 {
    let y2 = (180.0 - y * 360.0).to_radians();
    360.0 * y2.exp().atan().to_degrees() / 180.0 - 90.0
}

/// Unproject a world-space point back to WGS84 (x = longitude, y = latitude)
#[inline(always)]
pub fn unproject(world: Point<f64>) -> Point<f64> {
    Point::new(world_x_to_lng(world.x()), world_y_to_lat(world.y()))
}

/// Width of the world in pixels at the given zoom level
#[inline(always)]
pub fn world_scale(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1u32 << u32::from(zoom.min(MAX_ZOOM)))
}
