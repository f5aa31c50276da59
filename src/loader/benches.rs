//! Bench shapefile loading
//!
//! The city publishes bench locations as a point shapefile. Each feature
//! carries its council district (`AREA`), the broader area of the city
//! (`CITY_SITE`) and, redundantly, its coordinates as attributes.

use crate::domain::Bench;
use crate::error::{PipelineError, Result};
use shapefile::dbase::{FieldValue, Record};
use shapefile::Shape;
use std::path::Path;

pub const FIELD_DISTRICT: &str = "AREA";
pub const FIELD_CITY_AREA: &str = "CITY_SITE";
pub const FIELD_LATITUDE: &str = "LATITUDE";
pub const FIELD_LONGITUDE: &str = "LONGITUDE";

/// Load every bench feature from a point shapefile.
///
/// The `.dbf` attribute table must sit next to the `.shp` file.
pub fn load_benches(path: &Path) -> Result<Vec<Bench>> {
    if !path.exists() {
        return Err(PipelineError::load(path, "file not found"));
    }

    let mut reader =
        shapefile::Reader::from_path(path).map_err(|e| PipelineError::load(path, e))?;

    let mut benches = Vec::new();
    let mut skipped = 0usize;

    for (index, item) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = item.map_err(|e| PipelineError::load(path, e))?;

        match bench_from_feature(index, shape_point(&shape), &record)? {
            Some(bench) => benches.push(bench),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, path = %path.display(), "skipped bench features without a position");
    }
    tracing::debug!(count = benches.len(), "loaded benches");

    Ok(benches)
}

/// Point geometry of a shape as (x, y); None for non-point shapes
fn shape_point(shape: &Shape) -> Option<(f64, f64)> {
    match shape {
        Shape::Point(p) => Some((p.x, p.y)),
        Shape::PointM(p) => Some((p.x, p.y)),
        Shape::PointZ(p) => Some((p.x, p.y)),
        _ => None,
    }
}

/// Build a bench from one feature.
///
/// Attribute coordinates win over the shape geometry, which may be in a
/// projected CRS; the bench position is always the resolved lat/lon. A
/// feature with neither yields `Ok(None)`. A feature with only one of the two
/// coordinate attributes is a validation error.
fn bench_from_feature(
    index: usize,
    geometry: Option<(f64, f64)>,
    record: &Record,
) -> Result<Option<Bench>> {
    let label = format!("bench #{index}");
    let district = field_text(record, FIELD_DISTRICT);
    let city_area = field_text(record, FIELD_CITY_AREA);

    let attr_lat = field_number(record, FIELD_LATITUDE);
    let attr_lon = field_number(record, FIELD_LONGITUDE);

    let (lat, lon) = match (attr_lat, attr_lon, geometry) {
        (Some(lat), Some(lon), _) => (lat, lon),
        (Some(_), None, None) => return Err(PipelineError::missing(label, "LONGITUDE")),
        (None, Some(_), None) => return Err(PipelineError::missing(label, "LATITUDE")),
        (_, _, Some((x, y))) => (y, x),
        (None, None, None) => {
            tracing::debug!(index, "bench feature has no point geometry");
            return Ok(None);
        }
    };

    Ok(Some(Bench::new(district, city_area, lat, lon)))
}

fn field_text(record: &Record, name: &str) -> Option<String> {
    match record.get(name)? {
        FieldValue::Character(Some(s)) | FieldValue::Memo(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        FieldValue::Numeric(Some(n)) => Some(n.to_string()),
        FieldValue::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

fn field_number(record: &Record, name: &str) -> Option<f64> {
    match record.get(name)? {
        FieldValue::Numeric(Some(n)) => Some(*n),
        FieldValue::Float(Some(f)) => Some(f64::from(*f)),
        FieldValue::Double(d) => Some(*d),
        FieldValue::Integer(i) => Some(f64::from(*i)),
        FieldValue::Character(Some(s)) => s.trim().parse().ok(),
        _ => None,
    }
}
