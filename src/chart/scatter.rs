use crate::config::ChartConfig;
use crate::domain::Located;
use crate::error::{PipelineError, Result};
use crate::geometry::Bounds;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::Path;

/// One colored set of points on a map plot
#[derive(Debug, Clone)]
pub struct ScatterLayer {
    pub label: String,
    pub color: RGBColor,
    pub point_size: i32,
    /// (lon, lat) pairs
    pub points: Vec<(f64, f64)>,
}

impl ScatterLayer {
    pub fn from_records<T: Located>(label: &str, color: RGBColor, records: &[T]) -> Self {
        Self {
            label: label.to_string(),
            color,
            point_size: 2,
            points: records
                .iter()
                .map(|r| (r.longitude(), r.latitude()))
                .collect(),
        }
    }

    pub fn with_point_size(mut self, size: i32) -> Self {
        self.point_size = size;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ScatterSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl ScatterSpec {
    pub fn new(title: &str) -> Self {
        let size = ChartConfig::default();
        Self {
            title: title.to_string(),
            width: size.width,
            height: size.height,
        }
    }

    pub fn with_size(mut self, size: ChartConfig) -> Self {
        self.width = size.width;
        self.height = size.height;
        self
    }
}

/// Render point layers (longitude on x, latitude on y) to an SVG file
pub fn render_scatter(layers: &[ScatterLayer], spec: &ScatterSpec, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    draw_layers(root, layers, spec).map_err(|e| PipelineError::render(path, e))?;
    tracing::info!(path = %path.display(), layers = layers.len(), "wrote map");
    Ok(())
}

pub fn render_scatter_to_string(layers: &[ScatterLayer], spec: &ScatterSpec) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (spec.width, spec.height)).into_drawing_area();
        draw_layers(root, layers, spec)
            .map_err(|e| PipelineError::render(Path::new("<memory>"), e))?;
    }
    Ok(svg)
}

/// Shared extent of every layer, padded; a unit box when there are no points
fn layer_bounds(layers: &[ScatterLayer]) -> Bounds {
    let points: Vec<(f64, f64)> = layers.iter().flat_map(|l| l.points.iter().copied()).collect();
    match Bounds::from_points(&points) {
        Some(bounds) => bounds.padded(0.05, 0.001),
        None => Bounds {
            min_lon: -1.0,
            max_lon: 1.0,
            min_lat: -1.0,
            max_lat: 1.0,
        },
    }
}

fn draw_layers<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    layers: &[ScatterLayer],
    spec: &ScatterSpec,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let bounds = layer_bounds(layers);
    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(
            bounds.min_lon..bounds.max_lon,
            bounds.min_lat..bounds.max_lat,
        )?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .x_label_formatter(&|x| format!("{:.3}", x))
        .y_label_formatter(&|y| format!("{:.3}", y))
        .light_line_style(BLACK.mix(0.08))
        .draw()?;

    let mut labeled = false;
    for layer in layers.iter().filter(|l| !l.points.is_empty()) {
        let color = layer.color;
        let size = layer.point_size;
        chart
            .draw_series(
                layer
                    .points
                    .iter()
                    .map(move |&(lon, lat)| Circle::new((lon, lat), size, color.filled())),
            )?
            .label(layer.label.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
        labeled = true;
    }

    if labeled {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bench, Stop};

    #[test]
    fn test_overlay_layers() {
        let stops = vec![
            Stop::new("1", "Wilshire / Western", 34.0617, -118.3089),
            Stop::new("2", "Wilshire / Vermont", 34.0622, -118.2917),
        ];
        let benches = vec![Bench::new(Some("CD-10".to_string()), None, 34.0618, -118.3088)];

        let layers = vec![
            ScatterLayer::from_records("Stops", RED, &stops).with_point_size(4),
            ScatterLayer::from_records("Benches", BLUE, &benches),
        ];
        let svg = render_scatter_to_string(&layers, &ScatterSpec::new("Route 20")).unwrap();

        assert!(svg.contains("Route 20"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("Stops"));
        assert!(svg.contains("Benches"));
    }

    #[test]
    fn test_empty_layers() {
        let layers = vec![ScatterLayer::from_records::<Stop>("Stops", RED, &[])];
        let svg = render_scatter_to_string(&layers, &ScatterSpec::new("Nothing")).unwrap();
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_layer_bounds_cover_all_layers() {
        let a = ScatterLayer {
            label: "a".to_string(),
            color: RED,
            point_size: 2,
            points: vec![(-118.4, 34.0)],
        };
        let b = ScatterLayer {
            points: vec![(-118.2, 34.1)],
            ..a.clone()
        };

        let bounds = layer_bounds(&[a, b]);
        assert!(bounds.min_lon < -118.4 && bounds.max_lon > -118.2);
        assert!(bounds.min_lat < 34.0 && bounds.max_lat > 34.1);
    }
}
