use crate::chart::GroupedCounts;
use crate::clean::{CleanReport, PalmSplit};
use crate::error::{PipelineError, Result};
use crate::geometry::StopAccess;
use serde::Serialize;
use std::path::Path;

/// Everything a run learned, in one serializable record
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisSummary {
    pub route: String,
    pub radius_m: f64,
    pub stop_count: usize,
    /// Mean stop position as (lat, lon)
    pub route_center: Option<(f64, f64)>,
    pub bench_count: usize,
    pub corridor_bench_count: usize,
    pub benches_by_district: GroupedCounts,
    pub trees: Option<CleanReport>,
    pub palm_split: Option<PalmSplit>,
    pub shade_trees_by_district: GroupedCounts,
    pub stop_access: Vec<StopAccess>,
}

impl AnalysisSummary {
    pub fn stops_with_bench(&self) -> usize {
        self.stop_access.iter().filter(|a| a.has_bench()).count()
    }

    pub fn stops_with_shade(&self) -> usize {
        self.stop_access.iter().filter(|a| a.has_shade()).count()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::render(Path::new("summary.json"), e))
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| PipelineError::render(path, e))?;
        tracing::info!(path = %path.display(), "wrote summary");
        Ok(())
    }

    /// Human-readable lines for the terminal
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push(format!("Route {}: {} stops", self.route, self.stop_count));
        if let Some((lat, lon)) = self.route_center {
            lines.push(format!("  Center: ({:.4}, {:.4})", lat, lon));
        }

        if self.bench_count > 0 {
            lines.push(format!(
                "Benches: {} citywide, {} within {:.0}m of the route",
                self.bench_count, self.corridor_bench_count, self.radius_m
            ));
        }

        if let Some(trees) = &self.trees {
            lines.push(format!(
                "Trees: {} fetched, {} at (0,0), {} excluded by name, {} shade trees",
                trees.input, trees.zero_coordinates, trees.excluded_category, trees.retained
            ));
        }

        if let Some(split) = &self.palm_split {
            match split.shade_per_palm() {
                Some(ratio) => lines.push(format!(
                    "  Palms vs shade trees: {}:{} ({:.1} shade trees per palm)",
                    split.palms, split.shade, ratio
                )),
                None => lines.push(format!(
                    "  Palms vs shade trees: 0:{}",
                    split.shade
                )),
            }
        }

        if !self.stop_access.is_empty() {
            lines.push(format!(
                "Stops with a bench within {:.0}m: {}/{}",
                self.radius_m,
                self.stops_with_bench(),
                self.stop_access.len()
            ));
            lines.push(format!(
                "Stops with a shade tree within {:.0}m: {}/{}",
                self.radius_m,
                self.stops_with_shade(),
                self.stop_access.len()
            ));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(id: &str, benches: usize, trees: usize) -> StopAccess {
        StopAccess {
            stop_id: id.to_string(),
            display_name: format!("Stop {id}"),
            benches_within: benches,
            trees_within: trees,
            nearest_bench_m: None,
        }
    }

    #[test]
    fn test_summary_lines() {
        let summary = AnalysisSummary {
            route: "20".to_string(),
            radius_m: 50.0,
            stop_count: 3,
            route_center: Some((34.0617, -118.3089)),
            trees: Some(CleanReport {
                input: 10,
                zero_coordinates: 2,
                excluded_category: 3,
                retained: 5,
            }),
            palm_split: Some(PalmSplit { palms: 2, shade: 5 }),
            stop_access: vec![access("1", 1, 0), access("2", 0, 4), access("3", 2, 1)],
            ..Default::default()
        };

        let lines = summary.lines();
        assert_eq!(lines[0], "Route 20: 3 stops");
        assert!(lines.iter().any(|l| l.contains("2 at (0,0)")));
        assert!(lines.iter().any(|l| l.contains("2:5 (2.5 shade trees per palm)")));
        assert!(lines.iter().any(|l| l.ends_with("bench within 50m: 2/3")));
        assert!(lines.iter().any(|l| l.ends_with("shade tree within 50m: 2/3")));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = AnalysisSummary {
            route: "20".to_string(),
            stop_access: vec![access("1", 1, 1)],
            ..Default::default()
        };

        summary.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["route"], "20");
        assert_eq!(value["stop_access"][0]["benches_within"], 1);
        assert!(value["trees"].is_null());
    }
}
