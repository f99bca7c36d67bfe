//! img2cookie: turn a raster line drawing into cookie-cutter geometry.
//!
//! The pipeline reads a dark-on-light drawing and produces two sets of
//! closed polygons in image coordinates:
//!
//! - **outline**: the single largest dark region, dilated outward and
//!   simplified, which becomes the cutting wall;
//! - **detail**: the light regions trapped inside that silhouette,
//!   traced as a full contour tree so nested features keep their holes,
//!   which become the stamp.
//!
//! Serialization to layered/filled/even-odd SVG and OpenSCAD metadata
//! lives in [`svg_out`] and [`scad`]; this module only computes
//! geometry and never touches the filesystem except for opt-in debug
//! dumps.

#![forbid(unsafe_code)]

pub mod bitmap;
pub mod config;
pub mod error;
pub mod geom;
pub mod mask;
pub mod morphology;
pub mod scad;
pub mod simplify;
pub mod svg_out;
pub mod trace;

use image::{GrayImage, Luma, Rgb, RgbImage};

pub use crate::config::PipelineConfig;
pub use crate::error::PipelineError;
use crate::geom::Polygon;
use crate::trace::ContourSet;

/// Detail contours are simplified very lightly with a fixed factor;
/// fine interior features matter more than vertex count there.
const DETAIL_SIMPLIFY_FACTOR: f64 = 0.002;

/// Everything the pipeline extracts from one image.
#[derive(Debug, Clone)]
pub struct CookieResult {
    pub width: u32,
    pub height: u32,
    /// Zero or one polygons: the simplified silhouette boundary.
    pub outline: Vec<Polygon>,
    /// Interior detail, hierarchy intact.
    pub detail: ContourSet,
}

impl CookieResult {
    /// The detail rings in trace order, hierarchy flattened away.
    pub fn detail_rings(&self) -> Vec<Polygon> {
        self.detail
            .contours
            .iter()
            .map(|c| c.polygon.clone())
            .collect()
    }
}

/// Run the full raster-to-polygon pipeline on a grayscale image.
///
/// Empty results are not errors: an image with no dark region yields an
/// empty outline (with a stderr warning) and the downstream serializers
/// emit valid empty documents.
pub fn process(gray: &GrayImage, config: &PipelineConfig) -> CookieResult {
    let (width, height) = gray.dimensions();

    // Dark pixels become the silhouette mask.
    let mut shape_mask = bitmap::binarize(gray, config.threshold, config.blur, config.invert);
    eprintln!(
        "  Binarize    {}x{} px, threshold {}, blur {}",
        width, height, config.threshold, config.blur
    );

    // Outward offset doubles as gap bridging for sketchy strokes.
    if config.outline_offset > 0 {
        let kernel = morphology::offset_kernel(config.outline_offset);
        shape_mask = morphology::dilate_square(&shape_mask, kernel, 1);
        eprintln!("  Dilate      {kernel}x{kernel} kernel");
    }

    // The largest dark region is the cookie; everything else is noise.
    // Strict comparison over the scan keeps the earliest-traced region
    // on ties, same as ContourSet::largest.
    let candidates = trace::trace_external(&shape_mask);
    let mut outline = Vec::new();
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in candidates.iter().enumerate() {
        let area = c.area();
        if best.map_or(true, |(_, a)| area > a) {
            best = Some((i, area));
        }
    }
    if let Some(biggest) = best.map(|(i, _)| &candidates[i]) {
        let simplified = simplify::simplify_proportional(biggest, config.simplify_factor);
        eprintln!(
            "  Outline     {} of {} regions kept, {} -> {} points",
            1,
            candidates.len(),
            biggest.len(),
            simplified.len()
        );
        outline.push(simplified);
    } else {
        eprintln!("WARNING: no outline found (no dark region in the image?)");
    }

    // Fill the simplified outline, so detail is clipped by exactly the
    // shape that ends up in the output.
    let silhouette = mask::fill_polygons(width, height, &outline);

    // Light pixels inside the silhouette are the stamp detail.
    let white = bitmap::white_mask(gray, config.threshold, config.blur);
    let white_inside = mask::intersect(&white, &silhouette);
    let white_inside = morphology::erode_square(&white_inside, 3, 0);

    let mut detail = trace::trace_tree(&white_inside);
    let traced = detail.len();
    detail.retain_min_area(config.min_detail_area);
    simplify::simplify_set(&mut detail, DETAIL_SIMPLIFY_FACTOR);
    eprintln!("  Detail      {} of {} contours kept", detail.len(), traced);
    if detail.is_empty() {
        eprintln!("WARNING: no detail found (no light region inside the outline)");
    }

    if config.debug {
        dump_debug_images(&shape_mask, &silhouette, &white_inside);
    }

    CookieResult {
        width,
        height,
        outline,
        detail,
    }
}

/// Intermediate masks as debug_*.png in the working directory, plus a
/// red (silhouette) / green (detail) overlay. Failures to write are
/// ignored; diagnostics never abort a run.
fn dump_debug_images(shape_mask: &GrayImage, silhouette: &GrayImage, white_inside: &GrayImage) {
    shape_mask.save("debug_shape_mask.png").ok();
    silhouette.save("debug_silhouette_mask.png").ok();
    white_inside.save("debug_white_inside.png").ok();

    let overlay = RgbImage::from_fn(silhouette.width(), silhouette.height(), |x, y| {
        if white_inside.get_pixel(x, y) == &Luma([255]) {
            Rgb([0, 255, 0])
        } else if silhouette.get_pixel(x, y) == &Luma([255]) {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 0])
        }
    });
    overlay.save("debug_overlay.png").ok();
    eprintln!("  Debug       wrote debug_*.png");
}
