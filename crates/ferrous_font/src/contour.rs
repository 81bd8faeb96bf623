//! A contour: an ordered, closed chain of edges. Shapes are made of
//! contours; contours never stand alone once normalized.

use crate::segment::{Bounds, EdgeSegment};
use crate::vector::Vec2;

#[derive(Clone, Debug, Default)]
pub struct Contour {
    pub edges: Vec<EdgeSegment>,
}

#[inline]
fn trapezoid(a: Vec2, b: Vec2) -> f64 {
    (b.x - a.x) * (a.y + b.y)
}

impl Contour {
    pub fn new() -> Self {
        Contour { edges: Vec::new() }
    }

    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::empty();
        for edge in &self.edges {
            b.extend(edge.bounds());
        }
        b
    }

    /// Shoelace trapezoid sum, sign only. Positive means clockwise in the
    /// generator's coordinate system (spec's convention, not the usual
    /// y-up-CCW-positive one).
    pub fn winding(&self) -> i32 {
        if self.edges.is_empty() {
            return 0;
        }
        let mut total = 0.0;
        if self.edges.len() == 1 {
            let a = self.edges[0].point(0.0);
            let b = self.edges[0].point(1.0 / 3.0);
            let c = self.edges[0].point(2.0 / 3.0);
            total += trapezoid(a, b) + trapezoid(b, c) + trapezoid(c, a);
        } else if self.edges.len() == 2 {
            let a = self.edges[0].point(0.0);
            let b = self.edges[0].point(0.5);
            let c = self.edges[1].point(0.0);
            let d = self.edges[1].point(0.5);
            total += trapezoid(a, b) + trapezoid(b, c) + trapezoid(c, d) + trapezoid(d, a);
        } else {
            for edge in &self.edges {
                total += trapezoid(edge.point(0.0), edge.point(1.0));
            }
        }
        if total > 0.0 {
            1
        } else if total < 0.0 {
            -1
        } else {
            0
        }
    }

    pub fn reverse(&mut self) {
        self.edges.reverse();
        for e in &mut self.edges {
            *e = e.reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::EdgeColor;
    use crate::vector::Vec2;

    fn square() -> Contour {
        let p = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let mut c = Contour::new();
        for i in 0..4 {
            c.edges.push(EdgeSegment::Linear {
                p0: p[i],
                p1: p[(i + 1) % 4],
                color: EdgeColor::WHITE,
            });
        }
        c
    }

    #[test]
    fn ccw_square_has_negative_winding() {
        // (0,0)->(1,0)->(1,1)->(0,1) is CCW in a standard y-up frame;
        // this generator's convention treats CW as positive.
        assert_eq!(square().winding(), -1);
    }

    #[test]
    fn reversed_square_has_positive_winding() {
        let mut c = square();
        c.reverse();
        assert_eq!(c.winding(), 1);
    }

    #[test]
    fn bounds_of_unit_square() {
        let b = square().bounds();
        assert_eq!((b.left, b.bottom, b.right, b.top), (0.0, 0.0, 1.0, 1.0));
    }
}
