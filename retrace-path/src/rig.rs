//! Interface shared by camera variants.

use glam::{DVec3, Mat4};

use crate::frame::{CameraFrame, DegenerateFrame, orthonormalize};
use crate::projection::Projection;

/// A camera a render loop can pull once per frame.
pub trait CameraRig {
    /// Advance one rendered frame and return the resulting pose.
    fn update(&mut self) -> CameraFrame;

    /// Current pose, without advancing.
    fn frame(&self) -> CameraFrame;

    fn projection(&self) -> &Projection;

    fn view_matrix(&self) -> Mat4 {
        self.frame().view_matrix()
    }

    fn projection_matrix(&self) -> Mat4 {
        self.projection().matrix()
    }
}

/// A camera that never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCamera {
    frame: CameraFrame,
    projection: Projection,
}

impl FixedCamera {
    pub fn new(frame: CameraFrame, projection: Projection) -> Self {
        Self { frame, projection }
    }

    /// Camera at `eye` looking at `target`, rolled by `up_hint`.
    pub fn look_at(
        eye: DVec3,
        target: DVec3,
        up_hint: DVec3,
        projection: Projection,
    ) -> Result<Self, DegenerateFrame> {
        Ok(Self::new(orthonormalize(eye, target, up_hint)?, projection))
    }
}

impl CameraRig for FixedCamera {
    fn update(&mut self) -> CameraFrame {
        self.frame
    }

    fn frame(&self) -> CameraFrame {
        self.frame
    }

    fn projection(&self) -> &Projection {
        &self.projection
    }
}
