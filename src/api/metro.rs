use crate::api::http::{build_client, send_for_text};
use crate::config::MetroConfig;
use crate::domain::Stop;
use crate::error::{PipelineError, Result};
use geo::{Centroid, MultiPoint, Point};
use serde::Deserialize;
use serde_json::Value;

const SOURCE: &str = "metro stops";

/// Raw stops payload: `{"items": [...]}`
#[derive(Debug, Deserialize)]
struct StopsResponse {
    items: Vec<StopItem>,
}

#[derive(Debug, Deserialize)]
struct StopItem {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

pub fn stops_url(config: &MetroConfig, route: &str) -> String {
    format!(
        "{}/agencies/{}/routes/{}/stops/",
        config.base_url.trim_end_matches('/'),
        config.agency,
        route
    )
}

/// Fetch all stops served by a route.
///
/// # Arguments
/// * `config` - Agency API location and timeout
/// * `route` - Route identifier (e.g., "20")
pub fn fetch_stops(config: &MetroConfig, route: &str) -> Result<Vec<Stop>> {
    let client = build_client(SOURCE, config.timeout_secs)?;
    let url = stops_url(config, route);
    tracing::debug!(%url, "fetching route stops");

    let body = send_for_text(SOURCE, client.get(&url))?;
    let stops = parse_stops(&body)?;

    tracing::debug!(count = stops.len(), route, "parsed route stops");
    Ok(stops)
}

/// Decode a stops payload into domain records
pub fn parse_stops(body: &str) -> Result<Vec<Stop>> {
    let response: StopsResponse = serde_json::from_str(body)
        .map_err(|e| PipelineError::fetch(SOURCE, format!("malformed payload: {e}")))?;

    response
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.into_stop(index))
        .collect()
}

impl StopItem {
    fn into_stop(self, index: usize) -> Result<Stop> {
        let id = match self.id {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(PipelineError::missing(format!("stop #{index}"), "id")),
        };
        let label = format!("stop {id}");

        let display_name = self
            .display_name
            .ok_or_else(|| PipelineError::missing(label.clone(), "display_name"))?;
        let latitude = self
            .latitude
            .ok_or_else(|| PipelineError::missing(label.clone(), "latitude"))?;
        let longitude = self
            .longitude
            .ok_or_else(|| PipelineError::missing(label, "longitude"))?;

        Ok(Stop::new(id, display_name, latitude, longitude))
    }
}

/// Mean position of the route's stops as (lat, lon)
pub fn route_center(stops: &[Stop]) -> Option<(f64, f64)> {
    let points: MultiPoint<f64> = stops
        .iter()
        .map(|s| Point::new(s.longitude, s.latitude))
        .collect();
    points.centroid().map(|c| (c.y(), c.x()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_url() {
        let config = MetroConfig::default();
        assert_eq!(
            stops_url(&config, "20"),
            "https://api.metro.net/agencies/lametro/routes/20/stops/"
        );

        let config = MetroConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..MetroConfig::default()
        };
        assert_eq!(
            stops_url(&config, "720"),
            "http://localhost:8080/agencies/lametro/routes/720/stops/"
        );
    }

    #[test]
    fn test_parse_stops_response() {
        let json = r#"{"items": [
            {"id": "15620", "display_name": "Wilshire / Western", "latitude": 34.0617, "longitude": -118.3089},
            {"id": 3345, "display_name": "Wilshire / Vermont", "latitude": 34.0622, "longitude": -118.2917}
        ]}"#;

        let stops = parse_stops(json).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].id, "15620");
        assert_eq!(stops[0].display_name, "Wilshire / Western");
        assert_eq!(stops[1].id, "3345");
    }

    #[test]
    fn test_parse_stops_missing_items_is_fetch_error() {
        let err = parse_stops(r#"{"routes": []}"#).unwrap_err();
        assert!(matches!(err, PipelineError::Fetch { .. }));
    }

    #[test]
    fn test_parse_stops_missing_field_is_validation_error() {
        let json = r#"{"items": [{"id": "1", "display_name": "A", "latitude": 34.0}]}"#;
        let err = parse_stops(json).unwrap_err();
        match err {
            PipelineError::Validation { record, field, .. } => {
                assert_eq!(record, "stop 1");
                assert_eq!(field, "longitude");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_route_center_is_mean() {
        let stops = vec![
            Stop::new("1", "A", 34.0, -118.4),
            Stop::new("2", "B", 34.1, -118.2),
        ];
        let (lat, lon) = route_center(&stops).unwrap();
        assert!((lat - 34.05).abs() < 1e-9);
        assert!((lon + 118.3).abs() < 1e-9);

        assert!(route_center(&[]).is_none());
    }
}
