use std::fs;
use std::path::PathBuf;

use retrace::data::{SplineFile, SplineRep, generate_triggers, write_triggers};
use retrace::glam::DVec3;
use retrace::path::CameraFrame;
use retrace::{
    CameraRig, DataFormatError, PlaybackCamera, PlaybackError, PlaybackSettings, PlaybackSources,
    PlaybackStatus, TICKS_PER_SECOND, Tick, TriggerAlignment,
};

/// Scratch directory unique to one test.
struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("retrace-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn write(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(file);
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn cubic(points: &[[f64; 3]]) -> SplineRep {
    // Clamped uniform knots over [0, 1] seconds.
    let degree = 3;
    let pieces = points.len() - degree;
    let mut knots = vec![0.0; degree];
    knots.extend((0..=pieces).map(|i| i as f64 / pieces as f64));
    knots.extend(vec![1.0; degree]);
    let axis = |i: usize| points.iter().map(|p| p[i]).collect();
    SplineRep::new(knots, vec![axis(0), axis(1), axis(2)], degree)
}

/// Orbit around the origin with a wobbling look-at target and a noisy up hint.
fn orbit_spline() -> SplineFile {
    SplineFile {
        eye: cubic(&[
            [5.0, 1.0, 0.0],
            [4.0, 1.2, 3.0],
            [0.0, 1.5, 5.0],
            [-4.0, 1.2, 3.0],
            [-5.0, 1.0, 0.0],
            [-4.0, 0.8, -3.0],
        ]),
        target: cubic(&[
            [0.0, 0.0, 0.0],
            [0.2, 0.1, 0.0],
            [0.0, 0.3, 0.2],
            [-0.2, 0.1, 0.0],
            [0.0, -0.1, -0.2],
            [0.1, 0.0, 0.0],
        ]),
        up: cubic(&[
            [0.05, 1.0, 0.0],
            [0.0, 0.98, 0.1],
            [-0.08, 1.02, 0.0],
            [0.0, 0.97, -0.05],
            [0.1, 1.0, 0.02],
            [0.0, 1.0, 0.0],
        ]),
    }
}

const INTRINSICS: &str =
    r#"{"focal_length": 1000.0, "principal_point_x": 640.0, "principal_point_y": 500.0}"#;

fn sources(scratch: &Scratch, triggers: &[Tick]) -> PlaybackSources {
    let spline = serde_json::to_string(&orbit_spline()).unwrap();
    let mut trigger_text = Vec::new();
    write_triggers(&mut trigger_text, triggers).unwrap();
    PlaybackSources {
        spline: scratch.write("spline.json", &spline),
        intrinsics: scratch.write("intrinsics.json", INTRINSICS),
        triggers: scratch.write("triggers.txt", &String::from_utf8(trigger_text).unwrap()),
    }
}

/// Every pose of a full playback, including the initial one.
fn play_all(camera: &mut PlaybackCamera) -> Vec<CameraFrame> {
    let mut frames = vec![camera.frame()];
    while !camera.advance().is_done() {
        frames.push(camera.frame());
    }
    frames
}

#[test]
fn test_full_playback_is_orthonormal() {
    let scratch = Scratch::new("orthonormal");
    let triggers = generate_triggers(120, TICKS_PER_SECOND, TriggerAlignment::Mid).unwrap();
    let mut camera =
        PlaybackCamera::open(&sources(&scratch, &triggers), PlaybackSettings::default()).unwrap();

    let frames = play_all(&mut camera);
    assert_eq!(frames.len(), triggers.len());
    assert_eq!(camera.degenerate_frames(), 0);

    for frame in &frames {
        assert!(frame.is_orthonormal(1e-9), "not orthonormal: {frame:?}");
    }
}

#[test]
fn test_forward_follows_target() {
    let scratch = Scratch::new("forward");
    let triggers = generate_triggers(40, TICKS_PER_SECOND, TriggerAlignment::Start).unwrap();
    let mut camera =
        PlaybackCamera::open(&sources(&scratch, &triggers), PlaybackSettings::default()).unwrap();
    let path = camera.path().clone();

    let frames = play_all(&mut camera);
    for (frame, &tick) in frames.iter().zip(&triggers) {
        let sample = path.evaluate_ticks(tick, TICKS_PER_SECOND);
        let expected = (sample.target - sample.eye).normalize();
        assert!(frame.forward.abs_diff_eq(expected, 1e-12));
        assert!(frame.position.abs_diff_eq(sample.eye, 1e-12));
    }
}

#[test]
fn test_done_after_every_trigger() {
    let scratch = Scratch::new("done");
    let triggers = vec![0, 2_500_000, 5_000_000];
    let mut camera =
        PlaybackCamera::open(&sources(&scratch, &triggers), PlaybackSettings::default()).unwrap();

    assert_eq!(camera.current_tick(), 0);
    assert_eq!(camera.advance(), PlaybackStatus::Advanced { tick: 2_500_000 });
    assert_eq!(camera.advance(), PlaybackStatus::Advanced { tick: 5_000_000 });
    let last = camera.frame();
    assert!(!camera.is_done());

    assert_eq!(camera.advance(), PlaybackStatus::Finished);
    assert!(camera.is_done());
    for _ in 0..3 {
        assert_eq!(camera.update(), last);
        assert_eq!(camera.advance(), PlaybackStatus::Done);
    }
    assert_eq!(camera.triggers_consumed(), 3);
}

#[test]
fn test_playback_is_deterministic() {
    let scratch = Scratch::new("deterministic");
    let triggers = generate_triggers(64, TICKS_PER_SECOND, TriggerAlignment::End).unwrap();
    let sources = sources(&scratch, &triggers);

    let mut first = PlaybackCamera::open(&sources, PlaybackSettings::default()).unwrap();
    let mut second = PlaybackCamera::open(&sources, PlaybackSettings::default()).unwrap();
    assert_eq!(play_all(&mut first), play_all(&mut second));
}

#[test]
fn test_field_of_view_from_intrinsics() {
    let scratch = Scratch::new("fov");
    let camera =
        PlaybackCamera::open(&sources(&scratch, &[0]), PlaybackSettings::default()).unwrap();
    assert!((camera.field_of_view() - 0.9273).abs() < 1e-4);
    assert!((camera.snapshot().field_of_view - 2.0 * 0.5_f64.atan()).abs() < 1e-12);
}

#[test]
fn test_extrapolates_past_spline_end() {
    let scratch = Scratch::new("extrapolate");
    let triggers = vec![9_000_000, 12_000_000];
    let mut camera =
        PlaybackCamera::open(&sources(&scratch, &triggers), PlaybackSettings::default()).unwrap();
    assert!(!camera.path().contains(1.2));

    assert_eq!(camera.advance(), PlaybackStatus::Advanced { tick: 12_000_000 });
    let frame = camera.frame();
    assert!(frame.is_orthonormal(1e-9));
    assert!(frame.position.is_finite());
    assert_ne!(frame.position, DVec3::new(-4.0, 0.8, -3.0));
}

#[test]
fn test_missing_component_fails_construction() {
    let scratch = Scratch::new("missing");
    let mut sources = sources(&scratch, &[0]);
    sources.spline = scratch.write(
        "partial.json",
        r#"{"eye": {"knots": [0, 0, 1, 1], "coefficients": [[0, 1], [0, 0], [0, 0]], "degree": 1}}"#,
    );
    let result = PlaybackCamera::open(&sources, PlaybackSettings::default());
    assert!(matches!(
        result,
        Err(PlaybackError::Data(DataFormatError::Json(_)))
    ));
}

#[test]
fn test_bad_trigger_file_fails_construction() {
    let scratch = Scratch::new("badtrigger");
    let mut sources = sources(&scratch, &[0]);
    sources.triggers = scratch.write("bad.txt", "0\nabc\n");
    let result = PlaybackCamera::open(&sources, PlaybackSettings::default());
    assert!(matches!(
        result,
        Err(PlaybackError::Data(DataFormatError::InvalidTrigger { line: 2, .. }))
    ));
}

#[test]
fn test_empty_trigger_file_fails_construction() {
    let scratch = Scratch::new("emptytrigger");
    let mut sources = sources(&scratch, &[0]);
    sources.triggers = scratch.write("empty.txt", "\n");
    let result = PlaybackCamera::open(&sources, PlaybackSettings::default());
    assert!(matches!(result, Err(PlaybackError::EmptyTriggerList)));
}
