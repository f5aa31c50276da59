use super::Located;
use geo::Point;

/// A bus-stop bench loaded from the city shapefile
#[derive(Debug, Clone, PartialEq)]
pub struct Bench {
    /// Council district label (e.g. "CD-04")
    pub council_district: Option<String>,
    /// Larger area of the city the bench sits in
    pub city_area: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Point at the resolved coordinates, x = longitude, y = latitude
    pub geometry: Point<f64>,
}

impl Bench {
    pub fn new(
        council_district: Option<String>,
        city_area: Option<String>,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            council_district,
            city_area,
            latitude: lat,
            longitude: lon,
            geometry: Point::new(lon, lat),
        }
    }
}

impl Located for Bench {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}
