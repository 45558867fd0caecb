//! GPU-ready camera data.

use crate::rig::CameraRig;

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub fov_y: f32,
}

impl CameraUniform {
    /// Snapshot the current pose and projection of a camera.
    pub fn from_rig(rig: &impl CameraRig) -> Self {
        let frame = rig.frame();
        let projection = rig.projection();
        Self {
            view: frame.view_matrix().to_cols_array_2d(),
            projection: projection.matrix().to_cols_array_2d(),
            position: frame.position.as_vec3().to_array(),
            fov_y: projection.fov_y() as f32,
        }
    }
}
