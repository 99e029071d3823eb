//! Point-of-interest domain records
//!
//! A [`PointOfInterest`] is an immutable snapshot of the record supplied by
//! the external data-fetch layer. The engine only reads the id and the
//! coordinate; the remaining fields ride along for the presentation layer.

use geo::Point;

/// A named, located entity of interest on the map
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    /// Unique identifier assigned by the data layer
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Latitude in degrees (data-layer precondition: finite)
    pub latitude: f64,
    /// Longitude in degrees (data-layer precondition: finite)
    pub longitude: f64,
    /// Optional building association
    pub building: Option<String>,
    /// Optional street association
    pub street: Option<String>,
    /// Photo URLs attached to this POI
    pub photos: Vec<String>,
}

impl PointOfInterest {
    /// Create a POI with just an id and a coordinate
    ///
    /// The descriptive fields default to empty; the data layer normally
    /// fills them in when deserializing a full record.
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: None,
            latitude,
            longitude,
            building: None,
            street: None,
            photos: Vec::new(),
        }
    }

    /// Geographic coordinate (x = longitude, y = latitude)
    #[inline]
    pub fn coordinate(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Whether both coordinate components are finite
    #[inline]
    pub fn has_finite_coordinate(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poi_creation() {
        let poi = PointOfInterest::new("poi-1", 51.5074, -0.1278);
        assert_eq!(poi.id, "poi-1");
        assert_eq!(poi.coordinate(), Point::new(-0.1278, 51.5074));
        assert!(poi.name.is_empty());
        assert!(poi.photos.is_empty());
    }

    #[test]
    fn test_has_finite_coordinate() {
        assert!(PointOfInterest::new("a", 0.0, 0.0).has_finite_coordinate());
        assert!(!PointOfInterest::new("b", f64::NAN, 0.0).has_finite_coordinate());
        assert!(!PointOfInterest::new("c", 0.0, f64::INFINITY).has_finite_coordinate());
    }
}
