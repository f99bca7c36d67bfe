//! Ramer-Douglas-Peucker simplification for closed rings.

use kurbo::Point;
use rayon::prelude::*;

use crate::geom::Polygon;
use crate::trace::ContourSet;

/// Simplify a closed ring with tolerance proportional to its own
/// perimeter, so the same factor works across contour scales.
pub fn simplify_proportional(polygon: &Polygon, factor: f64) -> Polygon {
    simplify_polygon(polygon, factor * polygon.perimeter())
}

/// Simplify every contour of a set in place, tolerance proportional to
/// each ring's own perimeter. Contours are independent, so this runs
/// them in parallel.
pub fn simplify_set(set: &mut ContourSet, factor: f64) {
    set.contours
        .par_iter_mut()
        .for_each(|c| c.polygon = simplify_proportional(&c.polygon, factor));
}

/// Douglas-Peucker on a closed ring.
///
/// The open-chain algorithm keeps its two endpoints fixed; a ring has
/// none, so we anchor at vertex 0 and the vertex farthest from it,
/// then simplify the two chains between the anchors. Both anchors
/// always survive, so the result has at least two points (or is a
/// verbatim copy for rings too small to simplify). A non-positive
/// tolerance is a no-op.
pub fn simplify_polygon(polygon: &Polygon, tolerance: f64) -> Polygon {
    let pts = &polygon.points;
    if tolerance <= 0.0 || pts.len() < 3 {
        return polygon.clone();
    }

    // Second anchor: the vertex farthest from vertex 0.
    let mut far = 1;
    let mut far_d = 0.0;
    for (i, p) in pts.iter().enumerate().skip(1) {
        let d = pts[0].distance_squared(*p);
        if d > far_d {
            far_d = d;
            far = i;
        }
    }

    let mut out = Vec::new();
    simplify_chain(&pts[0..=far], tolerance, &mut out);
    // The second chain wraps around; close it back to vertex 0.
    let mut tail: Vec<Point> = pts[far..].to_vec();
    tail.push(pts[0]);
    let mut back = Vec::new();
    simplify_chain(&tail, tolerance, &mut back);
    // Neither chain emits its final endpoint, so the first chain stops
    // short of `far` and the second stops short of the duplicated
    // vertex 0. Concatenation closes the ring with no repeats.
    out.extend_from_slice(&back);

    Polygon::new(out)
}

/// Classic recursive step on an open chain. Appends every kept point
/// except the last (the caller stitches segments together).
fn simplify_chain(chain: &[Point], tolerance: f64, out: &mut Vec<Point>) {
    let (first, last) = (chain[0], chain[chain.len() - 1]);
    let mut worst = 0.0;
    let mut worst_i = 0;
    for (i, p) in chain.iter().enumerate().take(chain.len() - 1).skip(1) {
        let d = perpendicular_distance(*p, first, last);
        if d > worst {
            worst = d;
            worst_i = i;
        }
    }

    if worst > tolerance {
        simplify_chain(&chain[..=worst_i], tolerance, out);
        simplify_chain(&chain[worst_i..], tolerance, out);
    } else {
        out.push(first);
    }
}

fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len = ab.hypot();
    if len == 0.0 {
        return p.distance(a);
    }
    let ap = p - a;
    (ab.x * ap.y - ab.y * ap.x).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A square with extra collinear vertices along each edge.
    fn noisy_square() -> Polygon {
        let mut pts = Vec::new();
        for i in 0..10 {
            pts.push(Point::new(i as f64 * 10.0, 0.0));
        }
        for i in 0..10 {
            pts.push(Point::new(100.0, i as f64 * 10.0));
        }
        for i in 0..10 {
            pts.push(Point::new(100.0 - i as f64 * 10.0, 100.0));
        }
        for i in 0..10 {
            pts.push(Point::new(0.0, 100.0 - i as f64 * 10.0));
        }
        Polygon::new(pts)
    }

    #[test]
    fn collinear_vertices_collapse_to_corners() {
        let simple = simplify_polygon(&noisy_square(), 0.5);
        assert_eq!(simple.len(), 4);
        assert!((simple.area() - 10000.0).abs() < 1e-9);
    }

    #[test]
    fn zero_tolerance_is_a_no_op() {
        let sq = noisy_square();
        assert_eq!(simplify_polygon(&sq, 0.0), sq);
    }

    #[test]
    fn proportional_tolerance_scales_with_the_ring() {
        let small = noisy_square();
        let big = Polygon::new(small.points.iter().map(|p| (p.to_vec2() * 50.0).to_point()).collect());
        // Same factor, 50x the tolerance: both collapse to 4 corners.
        assert_eq!(simplify_proportional(&small, 0.01).len(), 4);
        assert_eq!(simplify_proportional(&big, 0.01).len(), 4);
    }

    #[test]
    fn simplification_keeps_sharp_features() {
        // A zigzag with 20-unit teeth must survive a 1-unit tolerance.
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(25.0, 20.0),
            Point::new(50.0, 0.0),
            Point::new(75.0, 20.0),
            Point::new(100.0, 0.0),
            Point::new(50.0, -40.0),
        ];
        let poly = Polygon::new(pts.clone());
        let simple = simplify_polygon(&poly, 1.0);
        assert_eq!(simple.points, pts);
    }

    #[test]
    fn result_is_never_shorter_than_two_points() {
        // A tiny sliver far below the tolerance still keeps its anchors.
        let sliver = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.1),
            Point::new(2.0, 0.0),
        ]);
        let simple = simplify_polygon(&sliver, 100.0);
        assert!(simple.len() >= 2);
    }
}
