//! Frame-accurate camera trajectory playback.
//!
//! Re-exports the data formats ([`data`]) and the trajectory engine ([`path`]).

pub use retrace_data as data;
pub use retrace_path as path;

pub use glam;
pub use retrace_data::{DataFormatError, Intrinsics, TICKS_PER_SECOND, Tick, TriggerAlignment};
pub use retrace_path::{
    CameraFrame, CameraRig, PlaybackCamera, PlaybackError, PlaybackSettings, PlaybackSources,
    PlaybackStatus, SplinePath,
};
