use glam::Mat4;

/// Fixed perspective projection configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fov_y: f64,
    aspect_ratio: f64,
    near: f64,
    far: f64,
}

impl Projection {
    /// Create a new projection. `fov_y` is the vertical field of view in radians.
    pub fn new(fov_y: f64, aspect_ratio: f64, near: f64, far: f64) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Get the projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y as f32,
            self.aspect_ratio as f32,
            self.near as f32,
            self.far as f32,
        )
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f64 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Get the near plane distance.
    pub fn near(&self) -> f64 {
        self.near
    }

    /// Get the far plane distance.
    pub fn far(&self) -> f64 {
        self.far
    }
}
