//! Shared geometry: polygons, areas, bounding boxes.

use kurbo::{Point, Rect};

use crate::error::PipelineError;

/// A closed polygon in pixel/drawing-space coordinates (y-down).
///
/// The last point connects implicitly back to the first; points are
/// never duplicated to close the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Perimeter of the closed ring, including the last→first edge.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| self.points[i].distance(self.points[(i + 1) % n]))
            .sum()
    }

    /// Signed area via the shoelace formula.
    ///
    /// In the y-down pixel frame a positive value means the ring winds
    /// clockwise on screen.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                self.points[i].x * self.points[j].y - self.points[j].x * self.points[i].y
            })
            .sum::<f64>()
            / 2.0
    }

    /// Absolute enclosed area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }
}

/// Minimal axis-aligned box enclosing every point of every polygon.
///
/// An empty input (no polygons, or only point-free polygons) is an
/// error rather than a degenerate zero box: a missing silhouette must
/// not silently turn into zero physical dimensions downstream.
pub fn bounding_rect_of(polygons: &[Polygon]) -> Result<Rect, PipelineError> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut n_points = 0usize;

    for poly in polygons {
        for p in &poly.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
            n_points += 1;
        }
    }

    if n_points == 0 {
        return Err(PipelineError::EmptyOutline);
    }

    Ok(Rect::new(min_x, min_y, max_x, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
    }

    #[test]
    fn square_area_and_perimeter() {
        let sq = unit_square();
        assert_eq!(sq.area(), 100.0);
        assert_eq!(sq.perimeter(), 40.0);
    }

    #[test]
    fn signed_area_flips_with_orientation() {
        let mut sq = unit_square();
        let a = sq.signed_area();
        sq.reverse();
        assert_eq!(sq.signed_area(), -a);
    }

    #[test]
    fn bounding_rect_spans_all_polygons() {
        let a = unit_square();
        let b = Polygon::new(vec![Point::new(20.0, -5.0), Point::new(25.0, 3.0)]);
        let rect = bounding_rect_of(&[a, b]).unwrap();
        assert_eq!(rect, Rect::new(0.0, -5.0, 25.0, 10.0));
    }

    #[test]
    fn bounding_rect_is_translation_equivariant() {
        let sq = unit_square();
        let rect = bounding_rect_of(std::slice::from_ref(&sq)).unwrap();

        let d = Vec2::new(7.5, -3.25);
        let moved = Polygon::new(sq.points.iter().map(|p| *p + d).collect());
        let moved_rect = bounding_rect_of(&[moved]).unwrap();

        assert_eq!(moved_rect, rect + d);
    }

    #[test]
    fn bounding_rect_of_nothing_is_an_error() {
        assert!(matches!(
            bounding_rect_of(&[]),
            Err(PipelineError::EmptyOutline)
        ));
        // Polygons without points count as nothing too.
        assert!(matches!(
            bounding_rect_of(&[Polygon::new(vec![])]),
            Err(PipelineError::EmptyOutline)
        ));
    }
}
