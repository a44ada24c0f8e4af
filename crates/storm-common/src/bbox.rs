//! Geographic bounding boxes used to scope profile queries and maps.

use serde::{Deserialize, Serialize};

/// A lat/lon bounding box in degrees.
///
/// Longitudes keep whatever convention the source data uses; nothing here
/// wraps or renormalizes them, so a box built around a point at -60° spans
/// -62°..-58° rather than 298°..302°.
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

    /// Box of `padding` degrees on every side of a single point.
    pub fn around_point(lat: f64, lon: f64, padding: f64) -> Self {
        Self {
            min_lon: lon - padding,
            min_lat: lat - padding,
            max_lon: lon + padding,
            max_lat: lat + padding,
        }
    }

    /// Smallest box enclosing every `(lat, lon)` pair, or `None` for an
    /// empty iterator.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (lat, lon) = iter.next()?;
        let mut bbox = Self::new(lon, lat, lon, lat);

        for (lat, lon) in iter {
            bbox.min_lon = bbox.min_lon.min(lon);
            bbox.min_lat = bbox.min_lat.min(lat);
            bbox.max_lon = bbox.max_lon.max(lon);
            bbox.max_lat = bbox.max_lat.max(lat);
        }

        Some(bbox)
    }

    /// Grow the box by `padding` degrees in both axes.
    pub fn expanded(&self, padding: f64) -> Self {
        Self {
            min_lon: self.min_lon - padding,
            min_lat: self.min_lat - padding,
            max_lon: self.max_lon + padding,
            max_lat: self.max_lat + padding,
        }
    }

    /// Longitude extent in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude extent in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Corners are ordered and finite.
    pub fn is_valid(&self) -> bool {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
            .iter()
            .all(|v| v.is_finite())
            && self.min_lon <= self.max_lon
            && self.min_lat <= self.max_lat
    }

    /// Check if a point is contained within this bbox (edges included).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_around_point() {
        let bbox = BoundingBox::around_point(20.0, -60.0, 2.0);
        assert_eq!(bbox.min_lon, -62.0);
        assert_eq!(bbox.max_lon, -58.0);
        assert_eq!(bbox.min_lat, 18.0);
        assert_eq!(bbox.max_lat, 22.0);
        assert!(bbox.is_valid());
    }

    #[test]
    fn test_enclosing_empty() {
        assert!(BoundingBox::enclosing(std::iter::empty()).is_none());
    }
}
