//! Pose writers for the `play` command.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use retrace_path::{CameraUniform, PlaybackCamera};

use crate::cli::OutputFormat;
use crate::errors::AppError;

/// Open `path` for writing, or stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, AppError> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Writes one record per rendered frame in the chosen format.
pub struct FrameWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    frames: usize,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            frames: 0,
        }
    }

    /// Record the camera's current pose.
    pub fn write(&mut self, camera: &PlaybackCamera) -> Result<(), AppError> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, &camera.snapshot())?;
                writeln!(self.writer)?;
            }
            OutputFormat::Csv => {
                if self.frames == 0 {
                    writeln!(
                        self.writer,
                        "tick,px,py,pz,rx,ry,rz,ux,uy,uz,fx,fy,fz,fov_y"
                    )?;
                }
                let s = camera.snapshot();
                write!(self.writer, "{}", s.tick)?;
                for v in [s.position, s.right, s.up, s.forward] {
                    write!(self.writer, ",{},{},{}", v[0], v[1], v[2])?;
                }
                writeln!(self.writer, ",{}", s.field_of_view)?;
            }
            OutputFormat::Uniform => {
                let uniform = CameraUniform::from_rig(camera);
                self.writer.write_all(bytemuck::bytes_of(&uniform))?;
            }
        }
        self.frames += 1;
        Ok(())
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn finish(mut self) -> Result<W, AppError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
