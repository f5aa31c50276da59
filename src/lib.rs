//! shadestop - Shade-tree and bench access along a bus route

pub mod api;
pub mod chart;
pub mod clean;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod report;

pub use error::{PipelineError, Result};
