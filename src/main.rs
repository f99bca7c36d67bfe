//! Command-line entry point.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;

use img2cookie::geom::bounding_rect_of;
use img2cookie::{bitmap, scad, svg_out, PipelineConfig};

/// Convert a raster line drawing into layered cookie-cutter SVGs.
///
/// Writes the layered drawing to OUTPUT, plus three siblings derived
/// from its name: `<base>_outline.svg` (filled silhouette),
/// `<base>_detail.svg` (even-odd compound detail) and
/// `<base>_meta.scad` (bounding-box dimensions for OpenSCAD).
#[derive(Parser, Debug)]
#[command(name = "img2cookie", version, about)]
struct Args {
    /// Input image (any format the `image` crate decodes).
    input: PathBuf,

    /// Output SVG file.
    output: PathBuf,

    /// Grayscale threshold; pixels at or below it count as ink.
    #[arg(long, default_value_t = 180)]
    threshold: u8,

    /// Gaussian blur kernel width before thresholding (0 disables,
    /// otherwise odd).
    #[arg(long, default_value_t = 3)]
    blur: u32,

    /// Treat the image as light-on-dark.
    #[arg(long)]
    invert: bool,

    /// Pixel expansion of the outer outline.
    #[arg(long, default_value_t = 5)]
    outline_offset: u32,

    /// Outline simplification, as a fraction of the contour perimeter.
    #[arg(long, default_value_t = 0.01)]
    simplify: f64,

    /// Ignore detail contours smaller than this area in square pixels.
    #[arg(long, default_value_t = 2.0)]
    min_area: f64,

    /// Write intermediate masks as debug_*.png.
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn validate(&self) -> Result<(), String> {
        if self.blur != 0 && self.blur % 2 == 0 {
            return Err(format!("--blur must be 0 or odd, got {}", self.blur));
        }
        if self.simplify <= 0.0 {
            return Err(format!("--simplify must be positive, got {}", self.simplify));
        }
        if self.min_area < 0.0 {
            return Err(format!("--min-area must be non-negative, got {}", self.min_area));
        }
        Ok(())
    }

    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            threshold: self.threshold,
            blur: self.blur,
            invert: self.invert,
            outline_offset: self.outline_offset,
            simplify_factor: self.simplify,
            min_detail_area: self.min_area,
            debug: self.debug,
        }
    }
}

/// Sibling path with the same stem and a suffix, e.g. `out_detail.svg`.
fn sibling(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}{suffix}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    args.validate()?;

    let gray = bitmap::load_grayscale(&args.input)?;
    let result = img2cookie::process(&gray, &args.config());

    let detail = result.detail_rings();
    let (w, h) = (result.width, result.height);

    svg_out::save(
        &args.output,
        &svg_out::layered_document(w, h, &result.outline, &detail),
    )?;
    eprintln!("  Write       {}", args.output.display());

    let outline_path = sibling(&args.output, "_outline.svg");
    svg_out::save(
        &outline_path,
        &svg_out::outline_document(w, h, &result.outline),
    )?;
    let detail_path = sibling(&args.output, "_detail.svg");
    svg_out::save(&detail_path, &svg_out::detail_document(w, h, &detail))?;
    eprintln!(
        "  Write       {} and {}",
        outline_path.display(),
        detail_path.display()
    );

    // Last on purpose: the SVGs above are still useful even when the
    // outline came up empty and no physical size can be reported.
    let bbox = bounding_rect_of(&result.outline)?;
    let meta_path = sibling(&args.output, "_meta.scad");
    scad::write_meta(&meta_path, bbox.width(), bbox.height())?;
    eprintln!("  Write       {}", meta_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_paths_share_the_stem() {
        let out = PathBuf::from("art/cookie.svg");
        assert_eq!(sibling(&out, "_outline.svg"), PathBuf::from("art/cookie_outline.svg"));
        assert_eq!(sibling(&out, "_meta.scad"), PathBuf::from("art/cookie_meta.scad"));
    }

    #[test]
    fn even_blur_is_rejected() {
        let mut args = Args::parse_from(["img2cookie", "in.png", "out.svg"]);
        assert!(args.validate().is_ok());
        args.blur = 4;
        assert!(args.validate().is_err());
    }
}
