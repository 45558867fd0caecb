//! Command execution.

use std::io::Write;
use std::path::Path;

use retrace_data::{
    Intrinsics, TICKS_PER_SECOND, Tick, generate_triggers, load_triggers, write_triggers,
};
use retrace_path::{PlaybackCamera, PlaybackSettings, PlaybackSources, PlaybackStatus, SplinePath};
use tracing::{info, warn};

use crate::cli::{Cli, Command, InfoArgs, PlayArgs, SampleArgs, TriggersArgs};
use crate::errors::AppError;
use crate::output::{FrameWriter, open_output};

/// Logging configuration.
pub struct LoggingConfig {
    pub level: String,
    #[cfg_attr(not(feature = "tracy"), allow(dead_code))]
    pub enable_tracy: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_tracy: false,
        }
    }
}

impl LoggingConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            level: cli.log_level.clone(),
            enable_tracy: cli.tracy,
        }
    }

    /// Install the global subscriber. Logs go to stderr so stdout stays
    /// usable for command output.
    pub fn init(&self) {
        #[cfg(feature = "tracy")]
        {
            if self.enable_tracy {
                use tracing_subscriber::Layer;
                use tracing_subscriber::layer::SubscriberExt;
                use tracing_subscriber::util::SubscriberInitExt;
                tracing_subscriber::registry()
                    .with(tracing_tracy::TracyLayer::default())
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(std::io::stderr)
                            .with_filter(
                                tracing_subscriber::EnvFilter::try_from_default_env()
                                    .unwrap_or_else(|_| self.level.clone().into()),
                            ),
                    )
                    .init();
                return;
            }
        }

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&self.level)),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

/// Run the selected command.
pub fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Triggers(args) => run_triggers(&args),
        Command::Info(args) => run_info(&args),
        Command::Play(args) => run_play(&args),
        Command::Sample(args) => run_sample(&args),
    }
}

fn run_triggers(args: &TriggersArgs) -> Result<(), AppError> {
    if !(args.duration_secs.is_finite() && args.duration_secs > 0.0) {
        return Err(AppError::InvalidArgument(format!(
            "duration must be positive, got {}",
            args.duration_secs
        )));
    }
    let duration = (args.duration_secs * TICKS_PER_SECOND as f64).round() as Tick;
    let triggers = generate_triggers(args.frames, duration, args.alignment())?;
    write_triggers(open_output(args.output.as_deref())?, &triggers)?;
    if let Some(path) = &args.output {
        info!("Wrote {} triggers to {}", triggers.len(), path.display());
    }
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<PlaybackSettings, AppError> {
    Ok(match path {
        Some(path) => PlaybackSettings::load(path)?,
        None => PlaybackSettings::default(),
    })
}

fn run_info(args: &InfoArgs) -> Result<(), AppError> {
    let settings = load_settings(args.settings.as_deref())?;
    let path = SplinePath::load(&args.spline)?;
    let (start, end) = path.domain();
    println!("spline domain: [{start}, {end}] s");
    for (name, curve) in [("eye", path.eye()), ("target", path.target()), ("up", path.up())] {
        let (s, e) = curve.domain();
        println!(
            "  {name}: degree {}, {} control points, [{s}, {e}] s",
            curve.degree(),
            curve.control_points().len()
        );
    }

    if let Some(intrinsics_path) = &args.intrinsics {
        let intrinsics = Intrinsics::load(intrinsics_path)?;
        println!(
            "field of view: {:.6} rad vertical, {:.6} rad horizontal, aspect {:.6}",
            intrinsics.field_of_view_y(),
            intrinsics.field_of_view_x(),
            intrinsics.aspect_ratio()
        );
    }

    if let Some(triggers_path) = &args.triggers {
        let triggers = load_triggers(triggers_path)?;
        match (triggers.first(), triggers.last()) {
            (Some(&first), Some(&last)) => {
                let outside = path.count_outside(&triggers, settings.ticks_per_second);
                println!(
                    "triggers: {} from {} to {} ({} outside the spline domain)",
                    triggers.len(),
                    first,
                    last,
                    outside
                );
            }
            _ => warn!("Trigger file is empty"),
        }
    }
    Ok(())
}

fn run_play(args: &PlayArgs) -> Result<(), AppError> {
    let mut settings = load_settings(args.settings.as_deref())?;
    if let Some(aspect) = args.aspect {
        settings = settings.with_aspect_ratio(aspect);
    }
    let near = args.near.unwrap_or(settings.near);
    let far = args.far.unwrap_or(settings.far);
    settings = settings.with_clip(near, far);

    let sources = PlaybackSources {
        spline: args.spline.clone(),
        intrinsics: args.intrinsics.clone(),
        triggers: args.triggers.clone(),
    };
    let mut camera = PlaybackCamera::open(&sources, settings)?;
    let mut writer = FrameWriter::new(open_output(args.output.as_deref())?, args.format);

    let frames = play_into(&mut camera, &mut writer)?;
    writer.finish()?;
    info!(
        "Wrote {} frames ({} held on degenerate frames)",
        frames,
        camera.degenerate_frames()
    );
    Ok(())
}

fn run_sample(args: &SampleArgs) -> Result<(), AppError> {
    let path = SplinePath::load(&args.spline)?;
    let (domain_start, domain_end) = path.domain();
    let start = args.start.unwrap_or(domain_start);
    let end = args.end.unwrap_or(domain_end);
    let times = sample_times(start, end, args.count)?;

    let mut out = open_output(args.output.as_deref())?;
    writeln!(out, "t,eye_x,eye_y,eye_z,target_x,target_y,target_z,up_x,up_y,up_z")?;
    for (t, sample) in times.iter().zip(path.evaluate_batch(&times)) {
        write!(out, "{t}")?;
        for v in [sample.eye, sample.target, sample.up] {
            write!(out, ",{},{},{}", v.x, v.y, v.z)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the initial pose and one record per remaining trigger. Held frames
/// repeat the previous pose so the record count matches the trigger count.
fn play_into<W: Write>(
    camera: &mut PlaybackCamera,
    writer: &mut FrameWriter<W>,
) -> Result<usize, AppError> {
    writer.write(camera)?;
    loop {
        match camera.advance() {
            PlaybackStatus::Advanced { .. } | PlaybackStatus::Held { .. } => {
                writer.write(camera)?;
            }
            PlaybackStatus::Finished | PlaybackStatus::Done => break,
        }
    }
    Ok(writer.frames())
}

/// `count` evenly spaced times from `start` to `end`, both inclusive.
fn sample_times(start: f64, end: f64, count: usize) -> Result<Vec<f64>, AppError> {
    match count {
        0 => Err(AppError::InvalidArgument(
            "sample count must be at least 1".to_string(),
        )),
        1 => Ok(vec![start]),
        _ => {
            let step = (end - start) / (count - 1) as f64;
            Ok((0..count).map(|i| start + step * i as f64).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_times_inclusive() {
        let times = sample_times(0.0, 1.0, 5).unwrap();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_sample_times_single() {
        assert_eq!(sample_times(2.0, 3.0, 1).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_sample_times_zero_rejected() {
        assert!(sample_times(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_play_writes_one_record_per_trigger() {
        use crate::cli::OutputFormat;
        use retrace_data::{SplineFile, SplineRep};
        use retrace_path::TriggerSequencer;

        let linear = |from: [f64; 3], to: [f64; 3]| {
            SplineRep::new(
                vec![0.0, 0.0, 1.0, 1.0],
                (0..3).map(|i| vec![from[i], to[i]]).collect(),
                1,
            )
        };
        // Forward lines up with the up hint at t = 1.
        let path = SplinePath::from_file(&SplineFile {
            eye: linear([0.0; 3], [0.0; 3]),
            target: linear([0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            up: linear([0.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
        })
        .unwrap();
        let intrinsics = Intrinsics::new(1000.0, 1000.0, 640.0, 500.0).unwrap();
        let mut camera = PlaybackCamera::new(
            path,
            &intrinsics,
            TriggerSequencer::new(vec![0, 2_500_000, TICKS_PER_SECOND, 5_000_000]),
            PlaybackSettings::default(),
        )
        .unwrap();

        let mut writer = FrameWriter::new(Vec::new(), OutputFormat::Json);
        assert_eq!(play_into(&mut camera, &mut writer).unwrap(), 4);
        assert_eq!(camera.degenerate_frames(), 1);

        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        let records: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 4);
        let ticks: Vec<u64> = records.iter().map(|r| r["tick"].as_u64().unwrap()).collect();
        assert_eq!(ticks, vec![0, 2_500_000, 2_500_000, 5_000_000]);
        assert_eq!(records[2]["position"], records[1]["position"]);
        assert_eq!(records[2]["forward"], records[1]["forward"]);
    }

    #[test]
    fn test_logging_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.enable_tracy);
    }
}
