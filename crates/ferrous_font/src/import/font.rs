//! Builds `Shape` contours from TTF `glyf`-style point data: runs of
//! on-curve and off-curve points, with the implied-midpoint convention
//! used whenever two off-curve points appear consecutively. The binary
//! table parsing itself lives in `ferrous_assets::font_parser`; this
//! module only knows about points and flags.

use crate::color::EdgeColor;
use crate::contour::Contour;
use crate::error::Result;
use crate::segment::EdgeSegment;
use crate::shape::Shape;
use crate::vector::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
    pub on_curve: bool,
}

impl RawPoint {
    pub fn new(x: f64, y: f64, on_curve: bool) -> Self {
        RawPoint { x, y, on_curve }
    }

    fn midpoint(&self, other: &RawPoint) -> RawPoint {
        RawPoint {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            on_curve: true,
        }
    }

    fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Walks one TTF contour's raw points into a closed `Contour` of
/// `EdgeSegment`s. `numberOfContours < 0` (composite glyphs) is rejected
/// by the caller before this is reached.
fn contour_from_points(raw: &[RawPoint]) -> Contour {
    if raw.is_empty() {
        return Contour::new();
    }

    // Insert implied on-curve midpoints between consecutive off-curve points.
    let mut interp: Vec<RawPoint> = Vec::with_capacity(raw.len() * 2);
    for i in 0..raw.len() {
        interp.push(raw[i]);
        let next = raw[(i + 1) % raw.len()];
        if !raw[i].on_curve && !next.on_curve {
            interp.push(raw[i].midpoint(&next));
        }
    }

    // Rotate so the walk starts at an on-curve point, synthesising one
    // from the wrap-around midpoint if every point is off-curve.
    let start = interp.iter().position(|p| p.on_curve);
    let ordered: Vec<RawPoint> = match start {
        Some(idx) => {
            let mut v = interp[idx..].to_vec();
            v.extend_from_slice(&interp[..idx]);
            v
        }
        None => {
            let synthetic = interp[0].midpoint(interp.last().unwrap());
            let mut v = vec![synthetic];
            v.extend_from_slice(&interp);
            v
        }
    };

    let mut contour = Contour::new();
    let start_point = ordered[0].pos();
    let mut i = 0usize;
    let n = ordered.len();
    while i < n {
        let current = ordered[i];
        let next = ordered[(i + 1) % n];
        if i + 1 == n {
            break;
        }
        if next.on_curve {
            contour.edges.push(EdgeSegment::Linear {
                p0: current.pos(),
                p1: next.pos(),
                color: EdgeColor::WHITE,
            });
            i += 1;
        } else {
            let control = next;
            let after = ordered[(i + 2) % n];
            contour.edges.push(EdgeSegment::Quadratic {
                p0: current.pos(),
                control: control.pos(),
                p1: after.pos(),
                color: EdgeColor::WHITE,
            });
            i += 2;
        }
    }

    if let Some(last_edge) = contour.edges.last() {
        if (last_edge.end_point() - start_point).length() > 1e-9 {
            contour.edges.push(EdgeSegment::Linear {
                p0: last_edge.end_point(),
                p1: start_point,
                color: EdgeColor::WHITE,
            });
        }
    }

    contour
}

/// Builds a `Shape` from a glyph's contours (each a list of raw TTF
/// points already split at contour end-points). Empty input yields an
/// empty shape (handled upstream as `EmptyShape`, not an error). A
/// contour with fewer than 2 distinct points is dropped — not enough
/// geometry to close, and not worth failing the whole glyph over.
pub fn build_shape(contours: &[Vec<RawPoint>]) -> Result<Shape> {
    let mut shape = Shape::new();
    shape.inverse_y_axis = true;
    for raw in contours {
        let distinct = raw
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits()))
            .collect::<std::collections::HashSet<_>>()
            .len();
        if distinct < 2 {
            log::warn!("dropping degenerate glyph contour with {distinct} distinct point(s)");
            continue;
        }
        let contour = contour_from_points(raw);
        if contour.edges.is_empty() {
            continue;
        }
        shape.contours.push(contour);
    }
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_triangle_all_on_curve() {
        let contour = vec![
            RawPoint::new(0.0, 0.0, true),
            RawPoint::new(1.0, 0.0, true),
            RawPoint::new(0.5, 1.0, true),
        ];
        let shape = build_shape(&[contour]).unwrap();
        assert_eq!(shape.contours.len(), 1);
        assert_eq!(shape.contours[0].edges.len(), 3);
        assert!(shape.contours[0]
            .edges
            .iter()
            .all(|e| matches!(e, EdgeSegment::Linear { .. })));
    }

    #[test]
    fn quadratic_run_with_single_off_curve_point() {
        let contour = vec![
            RawPoint::new(0.0, 0.0, true),
            RawPoint::new(0.5, 1.0, false),
            RawPoint::new(1.0, 0.0, true),
        ];
        let shape = build_shape(&[contour]).unwrap();
        assert_eq!(shape.contours[0].edges.len(), 2);
        assert!(matches!(shape.contours[0].edges[0], EdgeSegment::Quadratic { .. }));
    }

    #[test]
    fn consecutive_off_curve_points_get_implied_midpoint() {
        let contour = vec![
            RawPoint::new(0.0, 0.0, true),
            RawPoint::new(1.0, 1.0, false),
            RawPoint::new(2.0, 1.0, false),
            RawPoint::new(3.0, 0.0, true),
        ];
        let shape = build_shape(&[contour]).unwrap();
        assert_eq!(shape.contours.len(), 1);
        assert!(shape.contours[0].edges.len() >= 3);
    }

    #[test]
    fn all_off_curve_contour_still_resolves_via_implied_midpoints() {
        let contour = vec![
            RawPoint::new(0.0, 1.0, false),
            RawPoint::new(1.0, 0.0, false),
            RawPoint::new(0.0, -1.0, false),
            RawPoint::new(-1.0, 0.0, false),
        ];
        let shape = build_shape(&[contour]).unwrap();
        assert_eq!(shape.contours.len(), 1);
    }

    #[test]
    fn degenerate_single_point_contour_is_dropped() {
        let contour = vec![RawPoint::new(0.0, 0.0, true)];
        let shape = build_shape(&[contour]).unwrap();
        assert!(shape.contours.is_empty());
    }
}
