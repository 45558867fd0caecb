//! Retrace Data Crate
//!
//! Loading and validation for the inputs of camera trajectory playback:
//! B-spline path files, camera intrinsics records and trigger timestamp files.
//! This crate knows nothing about evaluation or rendering; it only turns bytes
//! on disk into validated, immutable values.

pub mod error;
pub mod intrinsics;
pub mod spline;
pub mod triggers;

pub use error::{DataFormatError, Result};
pub use intrinsics::Intrinsics;
pub use spline::{SplineFile, SplineRep, load_spline_file, parse_spline_file};
pub use triggers::{
    TICKS_PER_SECOND, Tick, TriggerAlignment, generate_triggers, load_triggers, parse_triggers,
    ticks_to_seconds, write_triggers,
};
