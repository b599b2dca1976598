//! Geographic bounding boxes.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Bounding box of a field's own coordinate arrays.
    ///
    /// Map extents clip to the coverage of the selected variable, not to a
    /// fixed global extent, so each variable may show a different region.
    /// Returns `None` when either coordinate array is empty.
    pub fn from_coords(longitude: &[f64], latitude: &[f64]) -> Option<Self> {
        let (min_lon, max_lon) = min_max(longitude)?;
        let (min_lat, max_lat) = min_max(latitude)?;
        Some(Self::new(min_lon, min_lat, max_lon, max_lat))
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a lon/lat point is contained within this bbox.
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(min, max), &v| {
        (min.min(v), max.max(v))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coords() {
        let lons = [0.0, 0.5, 1.0, 1.5, 2.0];
        let lats = [42.0, 41.0, 40.0];
        let bbox = BoundingBox::from_coords(&lons, &lats).unwrap();
        assert_eq!(bbox, BoundingBox::new(0.0, 40.0, 2.0, 42.0));
    }

    #[test]
    fn test_from_coords_unsorted() {
        // Descending latitude arrays (north-up grids) still produce min/max
        let bbox = BoundingBox::from_coords(&[1.0, 0.0], &[42.0, 40.0]).unwrap();
        assert_eq!(bbox, BoundingBox::new(0.0, 40.0, 1.0, 42.0));
    }

    #[test]
    fn test_from_coords_empty() {
        assert!(BoundingBox::from_coords(&[], &[40.0]).is_none());
    }

    #[test]
    fn test_contains_point() {
        let bbox = BoundingBox::new(0.0, 40.0, 2.0, 42.0);
        assert!(bbox.contains_point(1.0, 41.0));
        assert!(!bbox.contains_point(3.0, 41.0));
    }
}
