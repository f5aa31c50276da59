pub mod bounds;
pub mod proximity;

pub use bounds::Bounds;
pub use proximity::{StopAccess, route_corridor, stop_access};
