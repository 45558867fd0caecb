//! Retrace Path Crate
//!
//! The camera-trajectory engine: B-spline paths evaluated at trigger times,
//! orthonormal camera frames, and a trigger-driven playback camera that a
//! render loop pulls once per frame.
//!
//! ## Modules
//!
//! - [`spline`]: B-spline evaluation and the three-curve [`SplinePath`]
//! - [`frame`]: orthonormal camera frames from eye/target/up samples
//! - [`sequencer`]: cursor over the trigger list
//! - [`playback`]: the stateful [`PlaybackCamera`]
//! - [`rig`]: the [`CameraRig`] interface shared by camera variants
//! - [`projection`] and [`uniform`]: what a renderer consumes

pub mod error;
pub mod frame;
pub mod playback;
pub mod projection;
pub mod rig;
pub mod sequencer;
pub mod spline;
pub mod uniform;

pub use error::{PlaybackError, Result};
pub use frame::{CameraFrame, DEGENERACY_EPSILON, DegenerateFrame, orthonormalize};
pub use playback::{
    PlaybackCamera, PlaybackSettings, PlaybackSnapshot, PlaybackSources, PlaybackState,
    PlaybackStatus,
};
pub use projection::Projection;
pub use rig::{CameraRig, FixedCamera};
pub use sequencer::TriggerSequencer;
pub use spline::{BSpline, PathSample, SplinePath};
pub use uniform::CameraUniform;
