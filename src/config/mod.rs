use serde::Deserialize;
use std::path::PathBuf;

/// Defaults matching the route and corridor the analysis was built around.
pub mod defaults {
    pub const ROUTE: &str = "20";
    pub const AREA: &str = "WILSHIRE BL";
    pub const TREE_LIMIT: u32 = 4000;
    pub const RADIUS_M: f64 = 50.0;
    pub const OUTPUT_DIR: &str = "shadestop-out";
    pub const BENCHES_PATH: &str = "gdata/Bus_Stop_Benches.shp";

    pub const METRO_BASE_URL: &str = "https://api.metro.net";
    pub const METRO_AGENCY: &str = "lametro";

    pub const SOCRATA_DOMAIN: &str = "data.lacity.org";
    pub const SOCRATA_DATASET: &str = "vt5t-mscf";
    pub const SOCRATA_AREA_FIELD: &str = "locarea";

    pub const TIMEOUT_SECS: u64 = 60;

    pub const EXCLUDED_MARKERS: [&str; 4] = ["PALM", "NULL", "OTHER", "VACANT"];
    pub const PALM_MARKER: &str = "PALM";

    pub const CHART_WIDTH: u32 = 1024;
    pub const CHART_HEIGHT: u32 = 768;
}

fn default_route() -> String {
    defaults::ROUTE.to_string()
}
fn default_area() -> String {
    defaults::AREA.to_string()
}
fn default_limit() -> u32 {
    defaults::TREE_LIMIT
}
fn default_radius() -> f64 {
    defaults::RADIUS_M
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_route")]
    pub route: String,
    #[serde(default = "default_area")]
    pub area: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub benches: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_radius")]
    pub radius_m: f64,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub metro: MetroConfig,
    #[serde(default)]
    pub socrata: SocrataConfig,
    #[serde(default)]
    pub cleaning: CleaningConfig,
    #[serde(default)]
    pub charts: ChartConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            route: default_route(),
            area: default_area(),
            limit: default_limit(),
            benches: None,
            output: None,
            radius_m: default_radius(),
            verbose: default_verbose(),
            metro: MetroConfig::default(),
            socrata: SocrataConfig::default(),
            cleaning: CleaningConfig::default(),
            charts: ChartConfig::default(),
        }
    }
}

fn default_metro_base_url() -> String {
    defaults::METRO_BASE_URL.to_string()
}
fn default_metro_agency() -> String {
    defaults::METRO_AGENCY.to_string()
}
fn default_timeout_secs() -> u64 {
    defaults::TIMEOUT_SECS
}

/// Transit agency stops API
#[derive(Debug, Deserialize, Clone)]
pub struct MetroConfig {
    #[serde(default = "default_metro_base_url")]
    pub base_url: String,
    #[serde(default = "default_metro_agency")]
    pub agency: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MetroConfig {
    fn default() -> Self {
        Self {
            base_url: default_metro_base_url(),
            agency: default_metro_agency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_socrata_domain() -> String {
    defaults::SOCRATA_DOMAIN.to_string()
}
fn default_socrata_dataset() -> String {
    defaults::SOCRATA_DATASET.to_string()
}
fn default_socrata_area_field() -> String {
    defaults::SOCRATA_AREA_FIELD.to_string()
}

/// Socrata open-data portal holding the street tree inventory
#[derive(Debug, Deserialize, Clone)]
pub struct SocrataConfig {
    #[serde(default = "default_socrata_domain")]
    pub domain: String,
    #[serde(default = "default_socrata_dataset")]
    pub dataset: String,
    /// Column the area name is matched against
    #[serde(default = "default_socrata_area_field")]
    pub area_field: String,
    /// Optional app token, sent as `X-App-Token`
    #[serde(default)]
    pub app_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SocrataConfig {
    fn default() -> Self {
        Self {
            domain: default_socrata_domain(),
            dataset: default_socrata_dataset(),
            area_field: default_socrata_area_field(),
            app_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_exclude() -> Vec<String> {
    defaults::EXCLUDED_MARKERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_palm_marker() -> String {
    defaults::PALM_MARKER.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CleaningConfig {
    /// Substrings of the common name that disqualify a tree as shade
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    #[serde(default = "default_palm_marker")]
    pub palm_marker: String,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
            palm_marker: default_palm_marker(),
        }
    }
}

fn default_chart_width() -> u32 {
    defaults::CHART_WIDTH
}
fn default_chart_height() -> u32 {
    defaults::CHART_HEIGHT
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        // Logging is not initialized until the config is known
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("shadestop.toml"));
    paths.push(PathBuf::from(".shadestop.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("shadestop").join("config.toml"));
        paths.push(config_dir.join("shadestop.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".shadestop.toml"));
        paths.push(home.join(".config").join("shadestop").join("config.toml"));
    }

    paths
}
