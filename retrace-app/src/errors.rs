//! Error types for command execution.

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Data error: {0}")]
    Data(#[from] retrace_data::DataFormatError),

    #[error("Playback error: {0}")]
    Playback(#[from] retrace_path::PlaybackError),

    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
