use super::Located;
use serde::Serialize;

/// A street tree from the city inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tree {
    pub id: String,
    pub council_district: Option<String>,
    /// Free-text common name, upper case in the source data
    pub common_name: String,
    pub botanical_name: Option<String>,
    /// Trunk diameter at breast height, inches
    pub diameter: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Tree {
    pub fn new(id: impl Into<String>, common_name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            council_district: None,
            common_name: common_name.into(),
            botanical_name: None,
            diameter: None,
            latitude: lat,
            longitude: lon,
        }
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.council_district = Some(district.into());
        self
    }
}

impl Located for Tree {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}
