//! Trigger-driven camera playback.
//!
//! A [`PlaybackCamera`] replays a captured trajectory one trigger per rendered
//! frame. Construction consumes the first trigger to establish the initial
//! pose; every [`PlaybackCamera::advance`] consumes the next one. When the
//! list runs out the camera enters [`PlaybackState::Done`] for good and the
//! last pose stays frozen.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use retrace_data::{
    DataFormatError, Intrinsics, TICKS_PER_SECOND, Tick, load_triggers, ticks_to_seconds,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{PlaybackError, Result};
use crate::frame::{CameraFrame, orthonormalize};
use crate::projection::Projection;
use crate::rig::CameraRig;
use crate::sequencer::TriggerSequencer;
use crate::spline::SplinePath;

/// Projection and timing configuration for playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackSettings {
    /// Width over height. Taken from the intrinsics when unset.
    pub aspect_ratio: Option<f64>,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
    /// Tick rate of the trigger timestamps.
    pub ticks_per_second: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: None,
            near: 1e-3,
            far: 50.0,
            ticks_per_second: TICKS_PER_SECOND,
        }
    }
}

impl PlaybackSettings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(DataFormatError::from)?;
        let settings: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(DataFormatError::from)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Override the aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    /// Set near and far clip distances.
    pub fn with_clip(mut self, near: f64, far: f64) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Set the trigger tick rate.
    pub fn with_ticks_per_second(mut self, ticks_per_second: u64) -> Self {
        self.ticks_per_second = ticks_per_second;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(aspect) = self.aspect_ratio {
            if !(aspect.is_finite() && aspect > 0.0) {
                return Err(PlaybackError::InvalidSettings(format!(
                    "aspect ratio must be positive, got {aspect}"
                )));
            }
        }
        if !(self.near.is_finite() && self.near > 0.0 && self.far.is_finite() && self.far > self.near)
        {
            return Err(PlaybackError::InvalidSettings(format!(
                "clip distances must satisfy 0 < near < far, got near = {}, far = {}",
                self.near, self.far
            )));
        }
        if self.ticks_per_second == 0 {
            return Err(PlaybackError::InvalidSettings(
                "ticks per second must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where the playback inputs live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSources {
    pub spline: PathBuf,
    pub intrinsics: PathBuf,
    pub triggers: PathBuf,
}

/// Lifecycle of a playback camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Done,
}

/// Outcome of one [`PlaybackCamera::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// A new pose was computed for this trigger.
    Advanced { tick: Tick },
    /// The trigger produced a degenerate frame; the previous pose is kept.
    Held { tick: Tick },
    /// The trigger list just ran out. Returned exactly once.
    Finished,
    /// Playback had already finished; nothing changed.
    Done,
}

impl PlaybackStatus {
    pub fn is_done(self) -> bool {
        matches!(self, PlaybackStatus::Finished | PlaybackStatus::Done)
    }
}

/// What a renderer reads after each update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    /// Trigger the current pose was computed for.
    pub tick: Tick,
    pub position: [f64; 3],
    pub right: [f64; 3],
    pub up: [f64; 3],
    pub forward: [f64; 3],
    /// Vertical field of view in radians.
    pub field_of_view: f64,
    pub done: bool,
}

/// Camera that follows a spline path at precomputed trigger times.
///
/// Ignores user input entirely: the pose is a pure function of how many
/// triggers have been consumed.
#[derive(Debug, Clone)]
pub struct PlaybackCamera {
    path: SplinePath,
    sequencer: TriggerSequencer,
    projection: Projection,
    ticks_per_second: u64,
    frame: CameraFrame,
    tick: Tick,
    state: PlaybackState,
    degenerate_frames: usize,
}

impl PlaybackCamera {
    /// Load all inputs from disk and build the camera.
    ///
    /// Every file is read and validated here; nothing is read after this returns.
    #[tracing::instrument(skip_all, fields(spline = %sources.spline.display()))]
    pub fn open(sources: &PlaybackSources, settings: PlaybackSettings) -> Result<Self> {
        let path = SplinePath::load(&sources.spline)?;
        let intrinsics = Intrinsics::load(&sources.intrinsics)?;
        let triggers = load_triggers(&sources.triggers)?;
        Self::new(path, &intrinsics, TriggerSequencer::new(triggers), settings)
    }

    /// Build the camera from loaded inputs, consuming the first trigger.
    pub fn new(
        path: SplinePath,
        intrinsics: &Intrinsics,
        mut sequencer: TriggerSequencer,
        settings: PlaybackSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let ticks_per_second = settings.ticks_per_second;

        let tick = sequencer.advance().ok_or(PlaybackError::EmptyTriggerList)?;
        let sample = path.evaluate(ticks_to_seconds(tick, ticks_per_second));
        let frame = orthonormalize(sample.eye, sample.target, sample.up)
            .map_err(|source| PlaybackError::DegenerateInitialFrame { tick, source })?;

        let aspect_ratio = settings
            .aspect_ratio
            .unwrap_or_else(|| intrinsics.aspect_ratio());
        let projection = Projection::new(
            intrinsics.field_of_view_y(),
            aspect_ratio,
            settings.near,
            settings.far,
        );

        warn_outside_domain(&path, sequencer.triggers(), ticks_per_second);
        info!(
            "Playback ready: {} triggers, fov_y = {:.4} rad, aspect = {:.4}",
            sequencer.len(),
            projection.fov_y(),
            projection.aspect_ratio()
        );

        Ok(Self {
            path,
            sequencer,
            projection,
            ticks_per_second,
            frame,
            tick,
            state: PlaybackState::Playing,
            degenerate_frames: 0,
        })
    }

    /// Consume the next trigger and update the pose.
    pub fn advance(&mut self) -> PlaybackStatus {
        if self.state == PlaybackState::Done {
            return PlaybackStatus::Done;
        }

        let Some(tick) = self.sequencer.advance() else {
            self.state = PlaybackState::Done;
            info!(
                "Playback finished after {} triggers ({} degenerate frames held)",
                self.sequencer.cursor(),
                self.degenerate_frames
            );
            return PlaybackStatus::Finished;
        };

        let sample = self.path.evaluate(ticks_to_seconds(tick, self.ticks_per_second));
        match orthonormalize(sample.eye, sample.target, sample.up) {
            Ok(frame) => {
                self.frame = frame;
                self.tick = tick;
                debug!("Trigger {} -> position {}", tick, frame.position);
                PlaybackStatus::Advanced { tick }
            }
            Err(err) => {
                self.degenerate_frames += 1;
                warn!("Holding previous pose at trigger {}: {}", tick, err);
                PlaybackStatus::Held { tick }
            }
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the trigger list has been exhausted.
    pub fn is_done(&self) -> bool {
        self.state == PlaybackState::Done
    }

    /// Trigger the current pose was computed for.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Triggers consumed so far, including the initial one.
    pub fn triggers_consumed(&self) -> usize {
        self.sequencer.cursor()
    }

    pub fn trigger_count(&self) -> usize {
        self.sequencer.len()
    }

    /// Triggers whose frame was degenerate and therefore skipped.
    pub fn degenerate_frames(&self) -> usize {
        self.degenerate_frames
    }

    pub fn path(&self) -> &SplinePath {
        &self.path
    }

    /// Vertical field of view in radians, fixed at construction.
    pub fn field_of_view(&self) -> f64 {
        self.projection.fov_y()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            tick: self.tick,
            position: self.frame.position.to_array(),
            right: self.frame.right.to_array(),
            up: self.frame.up.to_array(),
            forward: self.frame.forward.to_array(),
            field_of_view: self.projection.fov_y(),
            done: self.is_done(),
        }
    }
}

impl CameraRig for PlaybackCamera {
    fn update(&mut self) -> CameraFrame {
        self.advance();
        self.frame
    }

    fn frame(&self) -> CameraFrame {
        self.frame
    }

    fn projection(&self) -> &Projection {
        &self.projection
    }
}

fn warn_outside_domain(path: &SplinePath, triggers: &[Tick], ticks_per_second: u64) {
    let outside = path.count_outside(triggers, ticks_per_second);
    if outside > 0 {
        let (start, end) = path.domain();
        warn!(
            "{} of {} triggers fall outside the spline domain [{}, {}] s and will extrapolate",
            outside,
            triggers.len(),
            start,
            end
        );
    }
}
