//! OpenSCAD metadata emission.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::PipelineError;

/// Write an OpenSCAD include file carrying the artwork's bounding-box
/// dimensions in viewBox units, for scaling the imported SVG to a
/// physical cutter size.
pub fn write_meta(path: &Path, width_units: f64, height_units: f64) -> Result<(), PipelineError> {
    let mut file = File::create(path)?;
    writeln!(file, "ART_W_U = {width_units:.6};")?;
    writeln!(file, "ART_H_U = {height_units:.6};")?;
    Ok(())
}
