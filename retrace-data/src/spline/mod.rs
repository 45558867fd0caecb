//! Serialized B-spline path files

mod loader;
mod rep;

pub use loader::{load_spline_file, parse_spline_file};
pub use rep::{MAX_DEGREE, SplineFile, SplineRep};
