pub mod benches;

pub use benches::load_benches;
