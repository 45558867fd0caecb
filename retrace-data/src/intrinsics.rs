//! Camera intrinsics records.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{DataFormatError, Result};

// On-disk record. A single focal length is shared by both axes unless a
// per-axis value is given.
#[derive(Deserialize, Debug)]
struct IntrinsicsRecord {
    focal_length: f64,
    #[serde(default)]
    focal_length_x: Option<f64>,
    #[serde(default)]
    focal_length_y: Option<f64>,
    principal_point_x: f64,
    principal_point_y: f64,
}

/// Pinhole camera intrinsics in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    pub focal_length_x: f64,
    pub focal_length_y: f64,
    pub principal_point_x: f64,
    pub principal_point_y: f64,
}

impl Intrinsics {
    /// Create validated intrinsics. All values must be positive and finite.
    pub fn new(
        focal_length_x: f64,
        focal_length_y: f64,
        principal_point_x: f64,
        principal_point_y: f64,
    ) -> Result<Self> {
        for (field, value) in [
            ("focal_length_x", focal_length_x),
            ("focal_length_y", focal_length_y),
            ("principal_point_x", principal_point_x),
            ("principal_point_y", principal_point_y),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DataFormatError::InvalidIntrinsic { field, value });
            }
        }
        Ok(Self {
            focal_length_x,
            focal_length_y,
            principal_point_x,
            principal_point_y,
        })
    }

    /// Load an intrinsics record from a JSON file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let record: IntrinsicsRecord = serde_json::from_reader(reader)?;
        Self::from_record(record)
    }

    /// Parse an intrinsics record that is already in memory.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let record: IntrinsicsRecord = serde_json::from_str(json)?;
        Self::from_record(record)
    }

    fn from_record(record: IntrinsicsRecord) -> Result<Self> {
        let intrinsics = Self::new(
            record.focal_length_x.unwrap_or(record.focal_length),
            record.focal_length_y.unwrap_or(record.focal_length),
            record.principal_point_x,
            record.principal_point_y,
        )?;
        debug!(
            "Intrinsics: f = ({}, {}), c = ({}, {}), fov_y = {:.4} rad",
            intrinsics.focal_length_x,
            intrinsics.focal_length_y,
            intrinsics.principal_point_x,
            intrinsics.principal_point_y,
            intrinsics.field_of_view_y()
        );
        Ok(intrinsics)
    }

    /// Vertical field of view in radians: `2 * atan(cy / fy)`.
    pub fn field_of_view_y(&self) -> f64 {
        2.0 * (self.principal_point_y / self.focal_length_y).atan()
    }

    /// Horizontal field of view in radians: `2 * atan(cx / fx)`.
    pub fn field_of_view_x(&self) -> f64 {
        2.0 * (self.principal_point_x / self.focal_length_x).atan()
    }

    /// Width over height of the image centered on the principal point.
    pub fn aspect_ratio(&self) -> f64 {
        self.principal_point_x / self.principal_point_y
    }
}
