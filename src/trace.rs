//! Border following over binary masks.
//!
//! Wraps `imageproc::contours::find_contours`, which implements
//! Suzuki-Abe border following and reports, per contour, whether it is
//! an outer border or a hole border and which contour encloses it.
//! Coordinates come back as integer pixel positions and are lifted into
//! f64 polygons here.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use kurbo::Point;

use crate::geom::Polygon;

/// One traced border: its ring, its kind, and its enclosing contour.
#[derive(Debug, Clone)]
pub struct TracedContour {
    pub polygon: Polygon,
    /// True for hole borders (the inner edge of a filled region).
    pub hole: bool,
    /// Index of the enclosing contour within the owning [`ContourSet`],
    /// or `None` for top-level contours.
    pub parent: Option<usize>,
}

/// A set of contours traced from one mask, hierarchy intact.
#[derive(Debug, Clone, Default)]
pub struct ContourSet {
    pub contours: Vec<TracedContour>,
}

impl ContourSet {
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Index of the contour with the largest absolute area. Ties go to
    /// the earliest-traced contour.
    pub fn largest(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, c) in self.contours.iter().enumerate() {
            let area = c.polygon.area();
            if best.map_or(true, |(_, a)| area > a) {
                best = Some((i, area));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Drop every contour with area below `min_area`, re-pointing each
    /// survivor's parent at its nearest kept ancestor.
    pub fn retain_min_area(&mut self, min_area: f64) {
        let keep: Vec<bool> = self
            .contours
            .iter()
            .map(|c| c.polygon.area() >= min_area)
            .collect();

        // Old index -> new index for survivors.
        let mut remap = vec![None; self.contours.len()];
        let mut next = 0usize;
        for (i, &k) in keep.iter().enumerate() {
            if k {
                remap[i] = Some(next);
                next += 1;
            }
        }

        let old = std::mem::take(&mut self.contours);
        let parents: Vec<Option<usize>> = old.iter().map(|c| c.parent).collect();
        for (i, mut c) in old.into_iter().enumerate() {
            if !keep[i] {
                continue;
            }
            // Walk up past dropped ancestors.
            let mut anc = c.parent;
            while let Some(p) = anc {
                if keep[p] {
                    break;
                }
                anc = parents[p];
            }
            c.parent = anc.and_then(|p| remap[p]);
            self.contours.push(c);
        }
    }
}

/// Trace the full contour tree of a mask: outer borders and hole
/// borders, with parent links.
///
/// Orientation is normalized so outer rings have positive signed area
/// in the y-down frame and holes negative, regardless of the trace
/// direction the border follower happened to use.
pub fn trace_tree(mask: &GrayImage) -> ContourSet {
    let raw = find_contours::<u32>(mask);
    let contours = raw
        .into_iter()
        .map(|c| {
            let hole = c.border_type == BorderType::Hole;
            let points = c
                .points
                .iter()
                .map(|p| Point::new(p.x as f64, p.y as f64))
                .collect();
            let mut polygon = Polygon::new(points);
            let area = polygon.signed_area();
            if (!hole && area < 0.0) || (hole && area > 0.0) {
                polygon.reverse();
            }
            TracedContour {
                polygon,
                hole,
                parent: c.parent,
            }
        })
        .collect();
    ContourSet { contours }
}

/// Trace only the outermost borders of a mask: top-level outer
/// contours, holes and nested regions ignored.
pub fn trace_external(mask: &GrayImage) -> Vec<Polygon> {
    trace_tree(mask)
        .contours
        .into_iter()
        .filter(|c| !c.hole && c.parent.is_none())
        .map(|c| c.polygon)
        .collect()
}
