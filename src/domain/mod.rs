pub mod bench;
pub mod stop;
pub mod tree;

pub use bench::Bench;
pub use stop::Stop;
pub use tree::Tree;

use geo::Point;

/// A record with a WGS84 position.
pub trait Located {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;

    /// Position as a `geo` point (x = longitude, y = latitude)
    fn position(&self) -> Point<f64> {
        Point::new(self.longitude(), self.latitude())
    }

    /// True when the record sits exactly on (0, 0), the placeholder the
    /// open-data exports use for ungeocoded rows
    fn is_at_origin(&self) -> bool {
        self.latitude() == 0.0 && self.longitude() == 0.0
    }
}
