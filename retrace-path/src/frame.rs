//! Orthonormal camera frames.

use glam::{DMat4, DVec3, Mat4};
use thiserror::Error;

/// Squared-length threshold under which a direction is treated as zero.
///
/// For the right axis this is compared against `sin²` of the angle between
/// forward and the up hint.
pub const DEGENERACY_EPSILON: f64 = 1e-12;

/// Camera position with an orthonormal right/up/forward basis.
///
/// `forward` points from the eye toward the look-at target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub position: DVec3,
    pub right: DVec3,
    pub up: DVec3,
    pub forward: DVec3,
}

impl CameraFrame {
    /// Right-handed world-to-view matrix, single precision for GPU upload.
    pub fn view_matrix(&self) -> Mat4 {
        DMat4::look_to_rh(self.position, self.forward, self.up).as_mat4()
    }

    /// Whether all axes are unit length and pairwise perpendicular.
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let axes = [self.right, self.up, self.forward];
        let unit = axes.iter().all(|a| (a.length() - 1.0).abs() <= tolerance);
        let perpendicular = self.right.dot(self.up).abs() <= tolerance
            && self.right.dot(self.forward).abs() <= tolerance
            && self.up.dot(self.forward).abs() <= tolerance;
        unit && perpendicular
    }
}

/// Inputs for which no camera basis exists.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DegenerateFrame {
    #[error("eye and target coincide at {eye}")]
    CoincidentEyeTarget { eye: DVec3 },

    #[error("forward {forward} is parallel to up hint {up_hint}")]
    ParallelUpHint { forward: DVec3, up_hint: DVec3 },
}

/// Build a camera frame from raw path samples.
///
/// The order is fixed: `forward` comes straight from `target - eye`, `right`
/// from `forward × up_hint`, and `up` is re-derived as `right × forward`. The
/// up hint only picks the roll; its own drift never leaks into the basis.
pub fn orthonormalize(
    eye: DVec3,
    target: DVec3,
    up_hint: DVec3,
) -> Result<CameraFrame, DegenerateFrame> {
    let to_target = target - eye;
    if to_target.length_squared() <= DEGENERACY_EPSILON {
        return Err(DegenerateFrame::CoincidentEyeTarget { eye });
    }
    let forward = to_target.normalize();

    let side = forward.cross(up_hint);
    if side.length_squared() <= DEGENERACY_EPSILON * up_hint.length_squared() {
        return Err(DegenerateFrame::ParallelUpHint { forward, up_hint });
    }
    let right = side.normalize();
    let up = right.cross(forward).normalize();

    Ok(CameraFrame {
        position: eye,
        right,
        up,
        forward,
    })
}
