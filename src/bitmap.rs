use std::borrow::Cow;
use std::path::Path;

use image::{GrayImage, ImageReader};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::filter::gaussian_blur_f32;

use crate::error::PipelineError;

/// Load an image from disk as an 8-bit grayscale buffer.
///
/// The core never sniffs formats itself; anything `image` cannot decode
/// surfaces as [`PipelineError::ImageLoad`].
pub fn load_grayscale(path: &Path) -> Result<GrayImage, PipelineError> {
    let img = ImageReader::open(path)
        .map_err(|e| PipelineError::ImageLoad(e.to_string()))?
        .decode()
        .map_err(|e| PipelineError::ImageLoad(e.to_string()))?
        .into_luma8();
    Ok(img)
}

/// Binarize a grayscale image: foreground (dark ink) becomes 255,
/// background 0.
///
/// The threshold is inverted: source art is assumed dark-on-light, so
/// pixels at or below `thresh` are foreground. `invert` flips the result
/// afterwards for light-on-dark art. Output contains only {0, 255}.
pub fn binarize(gray: &GrayImage, thresh: u8, blur: u32, invert: bool) -> GrayImage {
    let src = smoothed(gray, blur);
    let mut binary = threshold(&src, thresh, ThresholdType::BinaryInverted);

    if invert {
        for pixel in binary.pixels_mut() {
            pixel.0[0] = 255 - pixel.0[0];
        }
    }

    binary
}

/// The complementary mask: light pixels (above `thresh`) become 255.
///
/// Intersected with the filled silhouette, this isolates the interior
/// regions that become detail contours.
pub fn white_mask(gray: &GrayImage, thresh: u8, blur: u32) -> GrayImage {
    let src = smoothed(gray, blur);
    threshold(&src, thresh, ThresholdType::Binary)
}

/// Gaussian smoothing keyed off an odd kernel width, matching the
/// OpenCV convention the parameters were calibrated against:
/// sigma = 0.3*((k-1)*0.5 - 1) + 0.8. Zero or even widths disable it;
/// width 1 is a no-op kernel so it is skipped as well.
fn smoothed(gray: &GrayImage, blur: u32) -> Cow<'_, GrayImage> {
    if blur >= 3 && blur % 2 == 1 {
        Cow::Owned(gaussian_blur_f32(gray, kernel_sigma(blur)))
    } else {
        Cow::Borrowed(gray)
    }
}

fn kernel_sigma(kernel_width: u32) -> f32 {
    0.3 * ((kernel_width as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient(w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| Luma([((x * 23 + y * 7) % 256) as u8]))
    }

    #[test]
    fn binarize_output_is_strictly_binary() {
        for &blur in &[0u32, 3, 5] {
            let mask = binarize(&gradient(32, 32), 128, blur, false);
            assert!(mask.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        }
    }

    #[test]
    fn dark_pixels_become_foreground() {
        let mut img = GrayImage::from_pixel(8, 8, Luma([255]));
        img.put_pixel(3, 3, Luma([10]));
        let mask = binarize(&img, 180, 0, false);
        assert_eq!(mask.get_pixel(3, 3).0[0], 255);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn invert_flips_the_mask() {
        let mut img = GrayImage::from_pixel(8, 8, Luma([255]));
        img.put_pixel(3, 3, Luma([10]));
        let plain = binarize(&img, 180, 0, false);
        let flipped = binarize(&img, 180, 0, true);
        for (a, b) in plain.pixels().zip(flipped.pixels()) {
            assert_eq!(a.0[0], 255 - b.0[0]);
        }
    }

    #[test]
    fn white_mask_is_the_complement_without_blur() {
        let img = gradient(16, 16);
        let fg = binarize(&img, 128, 0, false);
        let bg = white_mask(&img, 128, 0);
        for (a, b) in fg.pixels().zip(bg.pixels()) {
            assert_eq!(a.0[0], 255 - b.0[0]);
        }
    }

    #[test]
    fn even_blur_disables_smoothing() {
        let img = gradient(16, 16);
        assert_eq!(binarize(&img, 100, 0, false), binarize(&img, 100, 4, false));
    }
}
