use super::Located;
use serde::Serialize;

/// A bus stop on the analyzed route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub id: String,
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Stop {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            latitude: lat,
            longitude: lon,
        }
    }
}

impl Located for Stop {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}
