//! Error types for playback construction.

use retrace_data::{DataFormatError, Tick};
use thiserror::Error;

use crate::frame::DegenerateFrame;

/// Errors that prevent a playback camera from being built.
///
/// Nothing here can occur once construction has succeeded: per-frame
/// evaluation never fails.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("data error: {0}")]
    Data(#[from] DataFormatError),

    #[error("trigger list is empty")]
    EmptyTriggerList,

    #[error("degenerate camera frame at initial trigger {tick}: {source}")]
    DegenerateInitialFrame {
        tick: Tick,
        #[source]
        source: DegenerateFrame,
    },

    #[error("invalid playback settings: {0}")]
    InvalidSettings(String),
}

/// Result alias for playback construction.
pub type Result<T> = std::result::Result<T, PlaybackError>;
