use super::counts::GroupedCounts;
use crate::config::ChartConfig;
use crate::error::{PipelineError, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::Path;

/// Titles and size of a grouped-count bar chart
#[derive(Debug, Clone)]
pub struct BarChartSpec {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub width: u32,
    pub height: u32,
}

impl BarChartSpec {
    pub fn new(title: &str, x_desc: &str, y_desc: &str) -> Self {
        let size = ChartConfig::default();
        Self {
            title: title.to_string(),
            x_desc: x_desc.to_string(),
            y_desc: y_desc.to_string(),
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

/// Render grouped counts as a bar chart SVG file
pub fn render_bar_chart(counts: &GroupedCounts, spec: &BarChartSpec, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    draw_bars(root, counts, spec).map_err(|e| PipelineError::render(path, e))?;
    tracing::info!(path = %path.display(), groups = counts.len(), "wrote bar chart");
    Ok(())
}

/// Render grouped counts as SVG markup
pub fn render_bar_chart_to_string(counts: &GroupedCounts, spec: &BarChartSpec) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (spec.width, spec.height)).into_drawing_area();
        draw_bars(root, counts, spec)
            .map_err(|e| PipelineError::render(Path::new("<memory>"), e))?;
    }
    Ok(svg)
}

fn draw_bars<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    counts: &GroupedCounts,
    spec: &BarChartSpec,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let entries = counts.entries();
    let slots = entries.len().max(1) as u32;
    let max_count = counts.max_count().max(1) as u32;
    // Headroom above the tallest bar
    let y_top = max_count + (max_count / 10).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..slots).into_segmented(), 0u32..y_top)?;

    let label_for = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => entries
            .get(*i as usize)
            .map(|(k, _)| k.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots as usize)
        .x_label_formatter(&label_for)
        .x_desc(spec.x_desc.as_str())
        .y_desc(spec.y_desc.as_str())
        .draw()?;

    chart.draw_series(entries.iter().enumerate().map(|(i, (_, count))| {
        let i = i as u32;
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0),
                (SegmentValue::Exact(i + 1), *count as u32),
            ],
            BLUE.mix(0.7).filled(),
        );
        bar.set_margin(0, 0, 4, 4);
        bar
    }))?;

    root.present()?;
    Ok(())
}
