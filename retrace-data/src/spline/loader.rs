//! Spline file loading functions

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::spline::SplineFile;

/// Load and validate a spline path file from disk.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_spline_file(path: impl AsRef<Path>) -> Result<SplineFile> {
    let path = path.as_ref();
    debug!("Loading spline file from: {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    let file: SplineFile = serde_json::from_reader(reader)?;
    file.validate()?;
    log_components(&file);
    Ok(file)
}

/// Parse and validate a spline path file that is already in memory.
pub fn parse_spline_file(json: &str) -> Result<SplineFile> {
    let file: SplineFile = serde_json::from_str(json)?;
    file.validate()?;
    log_components(&file);
    Ok(file)
}

fn log_components(file: &SplineFile) {
    for (name, rep) in [("eye", &file.eye), ("target", &file.target), ("up", &file.up)] {
        let (start, end) = rep.domain();
        debug!(
            "Spline '{}': degree {}, {} knots, domain [{}, {}]",
            name,
            rep.degree,
            rep.knots.len(),
            start,
            end
        );
    }
}
