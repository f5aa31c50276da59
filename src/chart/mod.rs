pub mod bar;
pub mod counts;
pub mod scatter;

pub use bar::{BarChartSpec, render_bar_chart, render_bar_chart_to_string};
pub use counts::{GroupedCounts, grouped_counts};
pub use scatter::{ScatterLayer, ScatterSpec, render_scatter, render_scatter_to_string};
