//! Binary morphology over {0, 255} masks.
//!
//! Thin wrappers around `imageproc::morphology` with square structuring
//! elements, expressed in kernel widths so call sites read like the
//! image-processing literature they were tuned against.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};

/// Dilate with a square structuring element of the given odd width,
/// repeated `iterations` times. Zero iterations returns the input
/// unchanged.
pub fn dilate_square(mask: &GrayImage, kernel_width: u32, iterations: u32) -> GrayImage {
    let k = half_width(kernel_width);
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = dilate(&out, Norm::LInf, k);
    }
    out
}

/// Erode with a square structuring element of the given odd width,
/// repeated `iterations` times. Zero iterations returns the input
/// unchanged.
pub fn erode_square(mask: &GrayImage, kernel_width: u32, iterations: u32) -> GrayImage {
    let k = half_width(kernel_width);
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = erode(&out, Norm::LInf, k);
    }
    out
}

/// Kernel width for growing the silhouette by `offset` pixels on each
/// side. Never smaller than a 1x1 no-op kernel.
pub fn offset_kernel(offset: u32) -> u32 {
    (2 * offset + 1).max(1)
}

// An LInf ball of radius k is a (2k+1)-wide square.
fn half_width(kernel_width: u32) -> u8 {
    (kernel_width / 2).min(u8::MAX as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn dot_mask() -> GrayImage {
        let mut m = GrayImage::from_pixel(9, 9, Luma([0]));
        m.put_pixel(4, 4, Luma([255]));
        m
    }

    #[test]
    fn zero_iterations_is_identity() {
        let m = dot_mask();
        assert_eq!(dilate_square(&m, 3, 0), m);
        assert_eq!(erode_square(&m, 3, 0), m);
    }

    #[test]
    fn dilation_grows_a_dot_into_a_square() {
        let grown = dilate_square(&dot_mask(), 3, 1);
        for y in 0..9 {
            for x in 0..9 {
                let inside = (3..=5).contains(&x) && (3..=5).contains(&y);
                assert_eq!(grown.get_pixel(x, y).0[0] == 255, inside, "at ({x},{y})");
            }
        }
    }

    #[test]
    fn erosion_removes_an_isolated_dot() {
        let shrunk = erode_square(&dot_mask(), 3, 1);
        assert!(shrunk.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn erosion_undoes_dilation_on_a_solid_block() {
        let mut m = GrayImage::from_pixel(16, 16, Luma([0]));
        for y in 5..11 {
            for x in 5..11 {
                m.put_pixel(x, y, Luma([255]));
            }
        }
        let closed = erode_square(&dilate_square(&m, 3, 1), 3, 1);
        assert_eq!(closed, m);
    }

    #[test]
    fn offset_kernel_widths() {
        assert_eq!(offset_kernel(0), 1);
        assert_eq!(offset_kernel(1), 3);
        assert_eq!(offset_kernel(5), 11);
    }
}
