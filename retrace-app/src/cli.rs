//! Command-line interface configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use retrace_data::TriggerAlignment;

/// Retrace - frame-accurate camera trajectory playback
#[derive(Parser, Debug)]
#[command(name = "retrace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Send spans to Tracy (requires the `tracy` feature)
    #[arg(long, global = true)]
    pub tracy: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an evenly spaced trigger file
    Triggers(TriggersArgs),
    /// Summarize spline, intrinsics and trigger inputs
    Info(InfoArgs),
    /// Replay the trajectory and write one pose per trigger
    Play(PlayArgs),
    /// Evaluate the spline path at evenly spaced times
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
pub struct TriggersArgs {
    /// Number of frames to generate triggers for
    #[arg(short = 'n', long)]
    pub frames: usize,

    /// Total duration covered by the frames, in seconds
    #[arg(short, long, default_value_t = 10.0)]
    pub duration_secs: f64,

    /// Position of each trigger within its frame interval
    #[arg(short, long, value_enum, default_value = "start")]
    pub align: Alignment,

    /// Custom fractional offset in [0, 1]; overrides --align
    #[arg(long)]
    pub offset: Option<f64>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    Mid,
    End,
}

impl TriggersArgs {
    pub fn alignment(&self) -> TriggerAlignment {
        match (self.offset, self.align) {
            (Some(offset), _) => TriggerAlignment::Offset(offset),
            (None, Alignment::Start) => TriggerAlignment::Start,
            (None, Alignment::Mid) => TriggerAlignment::Mid,
            (None, Alignment::End) => TriggerAlignment::End,
        }
    }
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Spline path file (JSON)
    #[arg(short, long)]
    pub spline: PathBuf,

    /// Camera intrinsics record (JSON)
    #[arg(short, long)]
    pub intrinsics: Option<PathBuf>,

    /// Trigger file, one tick per line
    #[arg(short, long)]
    pub triggers: Option<PathBuf>,

    /// Playback settings file (JSON); supplies the tick rate
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Spline path file (JSON)
    #[arg(short, long)]
    pub spline: PathBuf,

    /// Camera intrinsics record (JSON)
    #[arg(short, long)]
    pub intrinsics: PathBuf,

    /// Trigger file, one tick per line
    #[arg(short, long)]
    pub triggers: PathBuf,

    /// Playback settings file (JSON)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Aspect ratio override (width / height)
    #[arg(long)]
    pub aspect: Option<f64>,

    /// Near clip distance override
    #[arg(long)]
    pub near: Option<f64>,

    /// Far clip distance override
    #[arg(long)]
    pub far: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// Comma-separated values with a header row
    Csv,
    /// Packed camera uniforms, 144 bytes per frame
    Uniform,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Spline path file (JSON)
    #[arg(short, long)]
    pub spline: PathBuf,

    /// First sample time in seconds (defaults to the path domain start)
    #[arg(long)]
    pub start: Option<f64>,

    /// Last sample time in seconds (defaults to the path domain end)
    #[arg(long)]
    pub end: Option<f64>,

    /// Number of samples
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
