use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use plotters::style::{BLUE, GREEN, RED};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use shadestop::api::{fetch_stops, fetch_trees, route_center};
use shadestop::chart::{
    BarChartSpec, ScatterLayer, ScatterSpec, grouped_counts, render_bar_chart, render_scatter,
};
use shadestop::clean::{CategoryFilter, clean_trees, retain_positioned, split_palms};
use shadestop::config::{ChartConfig, FileConfig, defaults};
use shadestop::domain::{Bench, Stop, Tree};
use shadestop::geometry::{route_corridor, stop_access};
use shadestop::loader::load_benches;
use shadestop::report::AnalysisSummary;

/// Shade-tree and bus-bench access along a bus route
///
/// Examples:
///   # Analyze route 20 along Wilshire with the bench shapefile in gdata/
///   shadestop -r 20 -a "WILSHIRE BL" -b gdata/Bus_Stop_Benches.shp
///
///   # Stops and trees only, wider search radius
///   shadestop --skip-benches --radius 100
///
///   # Also exclude dead trees from the shade count
///   shadestop --exclude PALM --exclude NULL --exclude OTHER --exclude VACANT --exclude DEAD
#[derive(Parser, Debug)]
#[command(name = "shadestop")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches shadestop.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bus route number [default: 20]
    #[arg(short = 'r', long)]
    route: Option<String>,

    /// Bench shapefile (.shp with its .dbf alongside)
    #[arg(short = 'b', long)]
    benches: Option<PathBuf>,

    /// Tree inventory area name [default: "WILSHIRE BL"]
    #[arg(short = 'a', long)]
    area: Option<String>,

    /// Maximum number of tree records to request [default: 4000]
    #[arg(short = 'l', long)]
    limit: Option<u32>,

    /// Output directory for charts and summary.json [default: shadestop-out]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Stop proximity radius in meters [default: 50]
    #[arg(long)]
    radius: Option<f64>,

    /// Common-name substring that disqualifies a shade tree (repeatable,
    /// replaces the configured list)
    #[arg(long = "exclude", value_name = "SUBSTRING")]
    exclude: Vec<String>,

    /// Skip the bench shapefile
    #[arg(long)]
    skip_benches: bool,

    /// Skip the tree inventory
    #[arg(long)]
    skip_trees: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config: FileConfig = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let verbose = args.verbose || file_config.verbose;
    init_tracing(verbose);

    let route = args.route.clone().unwrap_or(file_config.route.clone());
    let area = args.area.clone().unwrap_or(file_config.area.clone());
    let limit = args.limit.unwrap_or(file_config.limit);
    let radius_m = args.radius.unwrap_or(file_config.radius_m);
    let output_dir = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| PathBuf::from(defaults::OUTPUT_DIR));
    let benches_path = args
        .benches
        .clone()
        .or_else(|| file_config.benches.clone())
        .unwrap_or_else(|| PathBuf::from(defaults::BENCHES_PATH));
    let exclude = if args.exclude.is_empty() {
        file_config.cleaning.exclude.clone()
    } else {
        args.exclude.clone()
    };
    let categories = CategoryFilter::new(exclude);
    let chart_size = file_config.charts;

    if radius_m <= 0.0 || !radius_m.is_finite() {
        bail!("--radius must be a positive number of meters, got {}", radius_m);
    }
    if limit == 0 {
        bail!("--limit must be at least 1");
    }

    println!("shadestop - Shade and Rest Along a Bus Route");
    println!("============================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Route: {}", route);
        println!("  Tree area: {} (limit {})", area, limit);
        if args.skip_benches {
            println!("  Benches: skipped");
        } else {
            println!("  Benches: {}", benches_path.display());
        }
        println!("  Radius: {}m", radius_m);
        println!("  Excluded names: {}", categories.markers().join(", "));
        println!("  Output: {}", output_dir.display());
        println!();
    }

    std::fs::create_dir_all(&output_dir).context(format!(
        "Failed to create output directory: {}",
        output_dir.display()
    ))?;

    let spinner = create_spinner(&format!("Fetching stops for route {}...", route));
    let start = Instant::now();
    let stops = fetch_stops(&file_config.metro, &route).context("Failed to fetch route stops")?;
    let stops = retain_positioned(stops);
    if stops.is_empty() {
        bail!("No stops found for route {}", route);
    }
    let center = route_center(&stops);
    spinner.finish_with_message(format!(
        "Fetched {} stops [{:.1}s]",
        stops.len(),
        start.elapsed().as_secs_f32()
    ));

    let benches = if args.skip_benches {
        Vec::new()
    } else {
        let spinner = create_spinner("Loading bench shapefile...");
        let start = Instant::now();
        let benches = load_benches(&benches_path).context("Failed to load benches")?;
        let benches = retain_positioned(benches);
        spinner.finish_with_message(format!(
            "Loaded {} benches [{:.1}s]",
            benches.len(),
            start.elapsed().as_secs_f32()
        ));
        benches
    };

    let (shade, tree_report, palm_split) = if args.skip_trees {
        (Vec::new(), None, None)
    } else {
        let spinner = create_spinner(&format!("Fetching trees along {}...", area));
        let start = Instant::now();
        let trees = fetch_trees(&file_config.socrata, &area, limit)
            .context("Failed to fetch street trees")?;
        spinner.finish_with_message(format!(
            "Fetched {} trees [{:.1}s]",
            trees.len(),
            start.elapsed().as_secs_f32()
        ));

        let positioned = retain_positioned(trees.clone());
        let palm_split = split_palms(
            &positioned,
            &file_config.cleaning.palm_marker,
            &categories,
        );
        let (shade, report) = clean_trees(trees, &categories);
        if verbose {
            println!(
                "  Dropped {} trees at (0,0) and {} by name",
                report.zero_coordinates, report.excluded_category
            );
        }
        (shade, Some(report), Some(palm_split))
    };

    let spinner = create_spinner("Overlaying benches and trees on the route...");
    let access = stop_access(&stops, &benches, &shade, radius_m);
    let corridor_benches = route_corridor(&stops, &benches, radius_m);
    let corridor_trees = route_corridor(&stops, &shade, radius_m);
    spinner.finish_with_message(format!(
        "{} benches and {} shade trees within {:.0}m of a stop",
        corridor_benches.len(),
        corridor_trees.len(),
        radius_m
    ));

    let spinner = create_spinner("Rendering charts...");
    let start = Instant::now();
    let written = render_charts(
        &output_dir,
        chart_size,
        &route,
        &stops,
        &benches,
        &shade,
        &corridor_benches,
        &corridor_trees,
    )?;
    spinner.finish_with_message(format!(
        "Wrote {} charts [{:.1}s]",
        written,
        start.elapsed().as_secs_f32()
    ));

    let summary = AnalysisSummary {
        route: route.clone(),
        radius_m,
        stop_count: stops.len(),
        route_center: center,
        bench_count: benches.len(),
        corridor_bench_count: corridor_benches.len(),
        benches_by_district: grouped_counts(&benches, |b| b.council_district.as_deref()),
        trees: tree_report,
        palm_split,
        shade_trees_by_district: grouped_counts(&shade, |t| t.council_district.as_deref()),
        stop_access: access,
    };
    let summary_path = output_dir.join("summary.json");
    summary
        .write_json(&summary_path)
        .context("Failed to write summary")?;

    println!();
    for line in summary.lines() {
        println!("{}", line);
    }
    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!("Output: {}", output_dir.display());

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn render_charts(
    dir: &Path,
    size: ChartConfig,
    route: &str,
    stops: &[Stop],
    benches: &[Bench],
    shade: &[Tree],
    corridor_benches: &[Bench],
    corridor_trees: &[Tree],
) -> Result<usize> {
    let mut written = 0;

    render_scatter(
        &[ScatterLayer::from_records("Bus stops", RED, stops).with_point_size(3)],
        &ScatterSpec::new(&format!("Bus stops along route {}", route)).with_size(size),
        &dir.join("stops_map.svg"),
    )?;
    written += 1;

    if !benches.is_empty() {
        render_bar_chart(
            &grouped_counts(benches, |b| b.council_district.as_deref()),
            &BarChartSpec::new(
                "Number of bus stop benches by Council Districts",
                "Council District",
                "Number of benches",
            )
            .with_size(size),
            &dir.join("benches_by_district.svg"),
        )?;
        render_bar_chart(
            &grouped_counts(benches, |b| b.city_area.as_deref()),
            &BarChartSpec::new(
                "Number of bus stop benches by Area of the city",
                "Area of the city",
                "Number of benches",
            )
            .with_size(size),
            &dir.join("benches_by_area.svg"),
        )?;
        render_scatter(
            &[ScatterLayer::from_records("Benches", BLUE, benches)],
            &ScatterSpec::new("Bus stop benches").with_size(size),
            &dir.join("bench_map.svg"),
        )?;
        written += 3;
    }

    if !shade.is_empty() {
        render_scatter(
            &[ScatterLayer::from_records("Shade trees", GREEN, shade)],
            &ScatterSpec::new("Shade trees").with_size(size),
            &dir.join("trees_map.svg"),
        )?;
        render_bar_chart(
            &grouped_counts(shade, |t| t.council_district.as_deref()),
            &BarChartSpec::new(
                "Number of shade trees by Council Districts",
                "Council Districts",
                "Number of shade trees",
            )
            .with_size(size),
            &dir.join("shade_trees_by_district.svg"),
        )?;
        written += 2;
    }

    render_scatter(
        &[
            ScatterLayer::from_records("Shade trees", GREEN, corridor_trees),
            ScatterLayer::from_records("Benches", BLUE, corridor_benches).with_point_size(3),
            ScatterLayer::from_records("Bus stops", RED, stops).with_point_size(4),
        ],
        &ScatterSpec::new(&format!("Benches and shade trees along route {}", route))
            .with_size(size),
        &dir.join("route_overlay.svg"),
    )?;
    written += 1;

    Ok(written)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
