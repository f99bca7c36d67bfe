//! Rasterizing polygons back into masks, and mask combination.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point as PixelPoint;

use crate::geom::Polygon;

/// Rasterize polygons as filled white regions on a black canvas of the
/// given size. Degenerate rings (fewer than three distinct pixel
/// positions after rounding) are skipped rather than drawn.
pub fn fill_polygons(width: u32, height: u32, polygons: &[Polygon]) -> GrayImage {
    let mut mask = GrayImage::from_pixel(width, height, Luma([0]));
    for polygon in polygons {
        let pts = pixel_ring(polygon);
        if pts.len() >= 3 {
            draw_polygon_mut(&mut mask, &pts, Luma([255]));
        }
    }
    mask
}

/// Pixel-wise AND of two equal-sized binary masks.
pub fn intersect(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y).0[0].min(b.get_pixel(x, y).0[0])])
    })
}

/// Round a ring to integer pixel positions, collapsing consecutive
/// duplicates. The rasterizer treats the ring as implicitly closed and
/// rejects an explicit closing point, so a trailing repeat of the
/// first position is dropped too.
fn pixel_ring(polygon: &Polygon) -> Vec<PixelPoint<i32>> {
    let mut pts: Vec<PixelPoint<i32>> = Vec::with_capacity(polygon.len());
    for p in &polygon.points {
        let q = PixelPoint::new(p.x.round() as i32, p.y.round() as i32);
        if pts.last() != Some(&q) {
            pts.push(q);
        }
    }
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    pts
}
