pub mod http;
pub mod metro;
pub mod socrata;

pub use metro::{fetch_stops, parse_stops, route_center};
pub use socrata::{fetch_trees, parse_trees};
