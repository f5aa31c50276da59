//! Stop-level overlay of benches and shade trees
//!
//! Distances are great-circle (haversine) meters between WGS84 points.
//! The datasets involved are a route's worth of stops against a few
//! thousand features, so a direct scan is used.

use crate::domain::{Bench, Located, Stop, Tree};
use geo::{Distance, Haversine, Point};
use serde::Serialize;

/// Amenities within reach of one stop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopAccess {
    pub stop_id: String,
    pub display_name: String,
    pub benches_within: usize,
    pub trees_within: usize,
    /// Distance to the closest bench anywhere, meters
    pub nearest_bench_m: Option<f64>,
}

impl StopAccess {
    pub fn has_bench(&self) -> bool {
        self.benches_within > 0
    }

    pub fn has_shade(&self) -> bool {
        self.trees_within > 0
    }
}

fn distance_m(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine::distance(a, b)
}

/// Count benches and trees within `radius_m` of each stop
pub fn stop_access(
    stops: &[Stop],
    benches: &[Bench],
    trees: &[Tree],
    radius_m: f64,
) -> Vec<StopAccess> {
    stops
        .iter()
        .map(|stop| {
            let origin = stop.position();

            let bench_distances: Vec<f64> = benches
                .iter()
                .map(|b| distance_m(origin, b.position()))
                .collect();

            let benches_within = bench_distances.iter().filter(|&&d| d <= radius_m).count();
            let nearest_bench_m = bench_distances.iter().copied().reduce(f64::min);
            let trees_within = trees
                .iter()
                .filter(|t| distance_m(origin, t.position()) <= radius_m)
                .count();

            StopAccess {
                stop_id: stop.id.clone(),
                display_name: stop.display_name.clone(),
                benches_within,
                trees_within,
                nearest_bench_m,
            }
        })
        .collect()
}

/// Records within `radius_m` of at least one stop on the route
pub fn route_corridor<T: Located + Clone>(stops: &[Stop], records: &[T], radius_m: f64) -> Vec<T> {
    let stop_points: Vec<Point<f64>> = stops.iter().map(|s| s.position()).collect();

    records
        .iter()
        .filter(|r| {
            let p = r.position();
            stop_points.iter().any(|&s| distance_m(s, p) <= radius_m)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Roughly 0.00009 degrees of latitude per 10 m
    const TEN_M_LAT: f64 = 0.00009;

    fn stop() -> Stop {
        Stop::new("1", "Wilshire / Western", 34.0617, -118.3089)
    }

    #[test]
    fn test_near_bench_far_tree() {
        let benches = vec![Bench::new(None, None, 34.0617 + TEN_M_LAT, -118.3089)];
        let trees = vec![Tree::new("t", "OAK", 34.0617 + 50.0 * TEN_M_LAT, -118.3089)];

        let access = stop_access(&[stop()], &benches, &trees, 50.0);
        assert_eq!(access.len(), 1);
        assert_eq!(access[0].benches_within, 1);
        assert_eq!(access[0].trees_within, 0);
        assert!(access[0].has_bench());
        assert!(!access[0].has_shade());

        let nearest = access[0].nearest_bench_m.unwrap();
        assert!((nearest - 10.0).abs() < 1.0, "nearest = {nearest}");
    }

    #[test]
    fn test_no_benches() {
        let access = stop_access(&[stop()], &[], &[], 50.0);
        assert_eq!(access[0].nearest_bench_m, None);
        assert_eq!(access[0].benches_within, 0);
    }

    #[test]
    fn test_route_corridor() {
        let near = Bench::new(Some("CD-10".to_string()), None, 34.0617, -118.3089 + 0.0001);
        let far = Bench::new(Some("CD-15".to_string()), None, 33.75, -118.28);

        let corridor = route_corridor(&[stop()], &[near.clone(), far], 50.0);
        assert_eq!(corridor, vec![near]);

        assert!(route_corridor::<Bench>(&[], &[], 50.0).is_empty());
    }
}
