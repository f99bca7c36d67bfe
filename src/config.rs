/// All pipeline parameters in one struct.
///
/// The CLI validates ranges before constructing this (blur must be zero
/// or odd, simplify factor positive, minimum area non-negative), so core
/// functions can take the values at face value.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    // -- Binarization --
    /// Grayscale threshold (0-255). Pixels at or below this become
    /// foreground; lower means less foreground.
    pub threshold: u8,
    /// Gaussian blur kernel width applied before thresholding.
    /// Odd and >= 3 to take effect; 0 (or any even value) disables.
    pub blur: u32,
    /// Swap foreground/background after thresholding (for white-on-black
    /// source art).
    pub invert: bool,

    // -- Silhouette --
    /// Pixel expansion of the outer outline (like Inkscape's Outset).
    /// Also bridges small gaps in hand-drawn strokes.
    pub outline_offset: u32,
    /// Outline simplification factor, as a fraction of the contour's
    /// own perimeter.
    pub simplify_factor: f64,

    // -- Detail --
    /// Ignore detail contours with area below this many square pixels.
    pub min_detail_area: f64,

    // -- Diagnostics --
    /// Save intermediate masks as debug_*.png in the working directory.
    pub debug: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: 180,
            blur: 3,
            invert: false,
            outline_offset: 5,
            simplify_factor: 0.01,
            min_detail_area: 2.0,
            debug: false,
        }
    }
}
