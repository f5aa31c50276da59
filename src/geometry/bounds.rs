use crate::domain::Located;

/// Longitude/latitude extent of a set of records
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Create bounds from (lon, lat) points
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_lon = f64::MAX;
        let mut max_lon = f64::MIN;
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;

        for &(lon, lat) in points {
            min_lon = min_lon.min(lon);
            max_lon = max_lon.max(lon);
            min_lat = min_lat.min(lat);
            max_lat = max_lat.max(lat);
        }

        Some(Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        })
    }

    pub fn from_records<T: Located>(records: &[T]) -> Option<Self> {
        let points: Vec<(f64, f64)> = records
            .iter()
            .map(|r| (r.longitude(), r.latitude()))
            .collect();
        Self::from_points(&points)
    }

    /// Expand bounds to include another set of (lon, lat) points
    pub fn expand(&mut self, points: &[(f64, f64)]) {
        for &(lon, lat) in points {
            self.min_lon = self.min_lon.min(lon);
            self.max_lon = self.max_lon.max(lon);
            self.min_lat = self.min_lat.min(lat);
            self.max_lat = self.max_lat.max(lat);
        }
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Grow each side by `fraction` of the extent so edge points are not
    /// drawn on the axis. Degenerate extents get a fixed pad of `min_pad`.
    pub fn padded(&self, fraction: f64, min_pad: f64) -> Self {
        let pad_lon = (self.width() * fraction).max(min_pad);
        let pad_lat = (self.height() * fraction).max(min_pad);
        Self {
            min_lon: self.min_lon - pad_lon,
            max_lon: self.max_lon + pad_lon,
            min_lat: self.min_lat - pad_lat,
            max_lat: self.max_lat + pad_lat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stop;

    #[test]
    fn test_bounds_from_points() {
        let points = vec![(-118.4, 34.0), (-118.2, 34.1), (-118.3, 34.05)];
        let bounds = Bounds::from_points(&points).unwrap();

        assert_eq!(bounds.min_lon, -118.4);
        assert_eq!(bounds.max_lon, -118.2);
        assert_eq!(bounds.min_lat, 34.0);
        assert_eq!(bounds.max_lat, 34.1);
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_from_records_and_expand() {
        let stops = vec![Stop::new("1", "A", 34.0, -118.3)];
        let mut bounds = Bounds::from_records(&stops).unwrap();
        assert_eq!(bounds.width(), 0.0);

        bounds.expand(&[(-118.1, 34.2)]);
        assert!((bounds.width() - 0.2).abs() < 1e-9);
        assert!((bounds.height() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_padded_single_point() {
        let bounds = Bounds::from_points(&[(-118.3, 34.0)]).unwrap();
        let padded = bounds.padded(0.05, 0.001);
        assert!((padded.width() - 0.002).abs() < 1e-12);
        assert!(padded.min_lat < 34.0 && padded.max_lat > 34.0);
    }
}
